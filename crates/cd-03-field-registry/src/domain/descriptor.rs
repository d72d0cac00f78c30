//! Typed field descriptors
//!
//! A descriptor keeps the document's presentation properties (so responses
//! can echo them) next to the typed view used for aggregation.

use cd_01_binning::{BinSpec, DateBinBy, NumericBinning};
use serde::Serialize;
use serde_json::Value;
use shared_types::{Collection, DataType};

use super::document::FieldDatatype;
use super::path::FieldPath;

/// Datatype-specific configuration, validated.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String {
        /// Declared labels, in display order. `None` means labels are
        /// derived from the data.
        enum_values: Option<Vec<String>>,
    },
    Number {
        units: Option<String>,
        binning: NumericBinning,
        /// Generated once at load.
        bins: Vec<BinSpec>,
    },
    Date {
        bin_by: DateBinBy,
    },
}

/// A configured discovery field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub id: String,
    pub mapping: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_for_search_filter: Option<String>,
    pub title: String,
    pub description: String,
    pub datatype: FieldDatatype,
    /// The `config` object exactly as written.
    pub config: Value,
    #[serde(skip)]
    pub kind: FieldKind,
    #[serde(skip)]
    pub path: FieldPath,
    /// Path used when the field filters individuals.
    #[serde(skip)]
    pub search_path: FieldPath,
}

impl FieldDescriptor {
    pub fn collection(&self) -> Collection {
        self.path.collection
    }

    /// Data type whose permissions govern this field.
    pub fn data_type(&self) -> DataType {
        self.path.data_type()
    }

    /// Declared labels of a string field.
    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::String { enum_values } => enum_values.as_deref(),
            _ => None,
        }
    }

    /// Bin layout of a number field.
    pub fn bins(&self) -> Option<&[BinSpec]> {
        match &self.kind {
            FieldKind::Number { bins, .. } => Some(bins),
            _ => None,
        }
    }
}
