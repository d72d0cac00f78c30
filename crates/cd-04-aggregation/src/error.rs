//! Error types for the Aggregation subsystem

use thiserror::Error;

/// Failures reported by the record store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed record fixture: {0}")]
    Fixture(String),
}

/// Errors that can occur while aggregating a field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A fixed limitation, not a transient failure.
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

/// A search filter value that does not fit its field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid value `{value}` for field `{field}`: {reason}")]
pub struct InvalidFilterValue {
    pub field: String,
    pub value: String,
    pub reason: String,
}
