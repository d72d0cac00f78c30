//! Stats Service
//!
//! Runs the storage queries for one field and hands the raw counts to the
//! pure bin assembly in `domain`.

use async_trait::async_trait;
use cd_01_binning::{YearMonth, YEAR_MONTH_LEN};
use cd_02_censorship::Censor;
use cd_03_field_registry::{FieldDescriptor, FieldKind};
use futures::future::try_join_all;
use shared_types::{Bin, Collection};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{self, Condition};
use crate::error::AggregationError;
use crate::ports::{AggregationApi, RecordStore};

/// Aggregation service over an injected record store.
pub struct StatsService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> StatsService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub async fn categorical_stats(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<Bin>, AggregationError> {
        let groups = self.store.group_count(&field.path).await?;
        Ok(domain::categorical_bins(&groups, field.enum_values(), censor))
    }

    pub async fn range_stats(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<Bin>, AggregationError> {
        let specs = field.bins().ok_or_else(|| not_implemented(field, "range stats"))?;

        let per_bin = specs
            .iter()
            .map(|spec| self.store.count_in_range(&field.path, spec.floor, spec.ceil));
        let (counts, total) = futures::try_join!(
            try_join_all(per_bin),
            self.store.count_records(field.collection()),
        )?;

        Ok(domain::range_bins(specs, &counts, total, censor))
    }

    /// Monthly histogram. Only dates stored as strings in free-form
    /// properties can be binned.
    pub async fn date_stats(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<Bin>, AggregationError> {
        ensure_monthly(field)?;
        let groups = self
            .store
            .group_count_by_prefix(&field.path, YEAR_MONTH_LEN)
            .await?;
        Ok(domain::monthly_bins(&groups, censor))
    }

    async fn month_options(&self, field: &FieldDescriptor) -> Result<Vec<String>, AggregationError> {
        ensure_monthly(field)?;
        let Some((first, last)) = self.store.distinct_bounds(&field.path).await? else {
            return Ok(Vec::new());
        };

        match (YearMonth::from_iso_date(&first), YearMonth::from_iso_date(&last)) {
            (Ok(start), Ok(end)) => Ok(domain::month_options(start, end)),
            _ => {
                warn!(field_id = %field.id, "Observed dates are not ISO formatted, no month options offered");
                Ok(Vec::new())
            }
        }
    }
}

fn not_implemented(field: &FieldDescriptor, what: &str) -> AggregationError {
    AggregationError::NotImplemented(format!("{} for {:?} field `{}`", what, field.datatype, field.id))
}

fn ensure_monthly(field: &FieldDescriptor) -> Result<(), AggregationError> {
    if !matches!(field.kind, FieldKind::Date { .. }) {
        return Err(not_implemented(field, "date stats"));
    }
    if !field.path.is_extra_property() {
        return Err(AggregationError::NotImplemented(format!(
            "binning date field `{}` outside extra_properties",
            field.id
        )));
    }
    Ok(())
}

#[async_trait]
impl<S: RecordStore + 'static> AggregationApi for StatsService<S> {
    async fn field_stats(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<Bin>, AggregationError> {
        debug!(field_id = %field.id, path = %field.path, "Aggregating field");
        match field.kind {
            FieldKind::String { .. } => self.categorical_stats(field, censor).await,
            FieldKind::Number { .. } => self.range_stats(field, censor).await,
            FieldKind::Date { .. } => self.date_stats(field, censor).await,
        }
    }

    async fn field_options(
        &self,
        field: &FieldDescriptor,
        censor: Censor,
    ) -> Result<Vec<String>, AggregationError> {
        match &field.kind {
            FieldKind::String {
                enum_values: Some(values),
            } => Ok(values.clone()),
            FieldKind::String { enum_values: None } => {
                let groups = self.store.group_count(&field.path).await?;
                Ok(domain::derived_options(&groups, censor))
            }
            FieldKind::Number { bins, .. } => Ok(bins.iter().map(|b| b.label.clone()).collect()),
            FieldKind::Date { .. } => self.month_options(field).await,
        }
    }

    async fn record_count(&self, collection: Collection, censor: Censor) -> Result<u64, AggregationError> {
        let total = self.store.count_records(collection).await?;
        Ok(censor.count(total))
    }

    async fn search_count(
        &self,
        conditions: &[Condition],
        censor: Censor,
    ) -> Result<u64, AggregationError> {
        let matching = self
            .store
            .count_matching(Collection::Individual, conditions)
            .await?;
        Ok(censor.count(matching))
    }
}
