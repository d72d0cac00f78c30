//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use cd_02_censorship::DisclosureRules;
use shared_types::Caller;

use crate::domain::{DiscoveryOutcome, OverviewResponse, SearchCount, SearchFieldsResponse, SearchFilter};
use crate::error::DiscoveryError;

/// Public discovery operations (Driving Port).
///
/// Consumed by a thin HTTP binding.
#[async_trait]
pub trait DiscoveryApi: Send + Sync {
    /// Search sections with the fields the caller may filter on.
    ///
    /// Fields whose data type the caller cannot count are left out rather
    /// than failing the request.
    async fn list_queryable_fields(
        &self,
        caller: &Caller,
    ) -> Result<DiscoveryOutcome<SearchFieldsResponse>, DiscoveryError>;

    /// Overview charts with censored histograms and entity totals.
    async fn public_overview(&self, caller: &Caller) -> Result<DiscoveryOutcome<OverviewResponse>, DiscoveryError>;

    /// Rules in effect for a query over `field_ids` (all queryable fields
    /// when `None` or empty).
    async fn discovery_rules(
        &self,
        caller: &Caller,
        field_ids: Option<&[String]>,
    ) -> Result<DisclosureRules, DiscoveryError>;

    /// Censored number of individuals matching every filter.
    async fn public_search(
        &self,
        caller: &Caller,
        filters: &[SearchFilter],
    ) -> Result<DiscoveryOutcome<SearchCount>, DiscoveryError>;
}
