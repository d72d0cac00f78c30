//! Typed field paths
//!
//! A mapping such as `individual/extra_properties/date_of_consent` is split
//! once, at load, into the collection it starts from and the path segments
//! that follow. Nothing re-parses mappings per request.

use serde::Serialize;
use shared_types::{Collection, DataType};
use std::fmt;

/// Separator between mapping segments.
pub const PATH_SEPARATOR: char = '/';

/// Segment under which free-form JSON properties live.
pub const EXTRA_PROPERTIES: &str = "extra_properties";

/// A resolved `(collection, path)` pair in the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldPath {
    pub collection: Collection,
    pub segments: Vec<String>,
}

/// Why a mapping could not be turned into a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    Malformed,
    UnknownCollection(String),
}

impl FieldPath {
    pub fn parse(mapping: &str) -> Result<Self, PathParseError> {
        let mut parts = mapping.split(PATH_SEPARATOR);
        let prefix = parts.next().unwrap_or_default();
        let segments: Vec<String> = parts.map(str::to_string).collect();

        if prefix.is_empty() || segments.is_empty() || segments.iter().any(String::is_empty) {
            return Err(PathParseError::Malformed);
        }

        let collection = prefix
            .parse()
            .map_err(|_| PathParseError::UnknownCollection(prefix.to_string()))?;

        Ok(Self {
            collection,
            segments,
        })
    }

    pub fn data_type(&self) -> DataType {
        self.collection.data_type()
    }

    /// Whether the path ends inside free-form JSON properties.
    pub fn is_extra_property(&self) -> bool {
        self.segments.iter().any(|s| s == EXTRA_PROPERTIES)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection)?;
        for segment in &self.segments {
            write!(f, "{}{}", PATH_SEPARATOR, segment)?;
        }
        Ok(())
    }
}
