//! Domain layer for the Discovery subsystem.

pub mod outcome;
pub mod responses;

pub use outcome::{DiscoveryOutcome, OutcomeKind, NO_PUBLIC_DATA_AVAILABLE, NO_PUBLIC_FIELDS_CONFIGURED};
pub use responses::{
    EntityCounts, FieldWithData, FieldWithOptions, OverviewResponse, SearchCount, SearchFieldsResponse,
    SearchFieldsSection, SearchFilter,
};
