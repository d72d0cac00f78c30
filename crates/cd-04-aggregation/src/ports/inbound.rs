//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use cd_02_censorship::Censor;
use cd_03_field_registry::FieldDescriptor;
use shared_types::{Bin, Collection};

use crate::domain::Condition;
use crate::error::AggregationError;

/// Censored statistics for configured fields (Driving Port).
#[async_trait]
pub trait AggregationApi: Send + Sync {
    /// Histogram of a field, censored with `censor`.
    async fn field_stats(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<Bin>, AggregationError>;

    /// Values a caller may filter the field on.
    async fn field_options(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<String>, AggregationError>;

    /// Censored total of a collection.
    async fn record_count(&self, collection: Collection, censor: Censor) -> Result<u64, AggregationError>;

    /// Censored number of individuals matching every condition.
    async fn search_count(
        &self,
        conditions: &[Condition],
        censor: Censor,
    ) -> Result<u64, AggregationError>;
}
