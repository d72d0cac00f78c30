//! Error types for the Discovery subsystem
//!
//! Expected outcomes (not configured, forbidden) are not errors; see
//! [`DiscoveryOutcome`](crate::domain::DiscoveryOutcome).

use cd_03_field_registry::ConfigurationError;
use cd_04_aggregation::{AggregationError, InvalidFilterValue, StorageError};
use thiserror::Error;

/// A rejected caller request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported field used in query: {0}")]
    UnknownField(String),

    #[error("Too many query parameters: {count} > {max}")]
    TooManyParameters { count: usize, max: u64 },

    #[error(transparent)]
    InvalidValue(#[from] InvalidFilterValue),
}

/// Errors that can occur in the Discovery subsystem
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
}

impl From<AggregationError> for DiscoveryError {
    fn from(e: AggregationError) -> Self {
        match e {
            AggregationError::Storage(e) => Self::Storage(e),
            AggregationError::NotImplemented(what) => Self::NotImplemented(what),
        }
    }
}

impl From<InvalidFilterValue> for DiscoveryError {
    fn from(e: InvalidFilterValue) -> Self {
        Self::Validation(e.into())
    }
}
