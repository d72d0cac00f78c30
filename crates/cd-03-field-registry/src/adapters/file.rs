//! File-backed configuration source

use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::domain::FieldSchema;
use crate::error::ConfigurationError;
use crate::registry::FieldRegistry;

/// Load the discovery document at `path`.
///
/// A missing file means discovery is not configured on this node and yields
/// `Ok(None)`. Any other read failure, or a malformed document, is fatal.
pub fn load_registry(
    path: &Path,
    schema: &dyn FieldSchema,
) -> Result<Option<FieldRegistry>, ConfigurationError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "No discovery config found, discovery is not configured");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigurationError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let registry = FieldRegistry::from_json(&json, schema)?;
    if registry.is_none() {
        info!(path = %path.display(), "Discovery config is empty, discovery is not configured");
    }
    Ok(registry)
}
