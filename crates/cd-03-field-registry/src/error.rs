//! Error types for the Field Registry subsystem

use cd_01_binning::BinningError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems.
///
/// These are authoring bugs in the discovery document. They are raised once,
/// at load, and are never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read discovery config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed discovery config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Field `{field}`: malformed mapping `{mapping}`")]
    MalformedMapping { field: String, mapping: String },

    #[error("Field `{field}`: accessing field on collection `{prefix}` is not implemented")]
    UnknownCollection { field: String, prefix: String },

    #[error("Field `{field}`: path `{path}` does not exist in the storage schema")]
    UnknownPath { field: String, path: String },

    #[error("Field `{field}`: invalid config: {reason}")]
    InvalidFieldConfig { field: String, reason: String },

    #[error("Field `{field}`: invalid binning: {source}")]
    InvalidBinning {
        field: String,
        #[source]
        source: BinningError,
    },

    #[error("Section `{section}` references unknown field `{field}`")]
    UnknownFieldReference { section: String, field: String },

    #[error("Field `{field}` cannot be used to filter individuals (path `{path}`)")]
    NotSearchable { field: String, path: String },
}
