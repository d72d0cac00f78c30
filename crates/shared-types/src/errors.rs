//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors parsing shared entities from their wire names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityParseError {
    /// Mapping prefix names no known collection.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Identifier names no known data type.
    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    /// Permission name is not one of the discovery permissions.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// A permission granting data without counts.
    #[error("Data permission without counts permission")]
    DataWithoutCounts,
}
