//! Raw discovery document
//!
//! The on-disk JSON shape, deserialized as-is. Nothing here is validated;
//! `FieldRegistry::new` turns a document into typed, checked descriptors.

use cd_02_censorship::DisclosureRules;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Declared datatype of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldDatatype {
    String,
    Number,
    Date,
}

/// One chart in an overview section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewChart {
    pub field: String,
    pub chart_type: String,
    /// Presentation hints passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSection {
    pub section_title: String,
    pub charts: Vec<OverviewChart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSection {
    pub section_title: String,
    pub fields: Vec<String>,
}

/// A field entry as written in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub mapping: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_for_search_filter: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub datatype: FieldDatatype,
    #[serde(default = "empty_config")]
    pub config: Value,
}

fn empty_config() -> Value {
    Value::Object(Map::new())
}

/// The complete discovery document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    #[serde(default)]
    pub overview: Vec<OverviewSection>,
    #[serde(default)]
    pub search: Vec<SearchSection>,
    #[serde(default)]
    pub fields: BTreeMap<String, RawField>,
    pub rules: DisclosureRules,
}

impl DiscoveryDocument {
    /// Parse a document. `null` and `{}` mean "not configured".
    pub fn from_json(json: &str) -> Result<Option<Self>, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        match &value {
            Value::Null => Ok(None),
            Value::Object(map) if map.is_empty() => Ok(None),
            _ => serde_json::from_value(value).map(Some),
        }
    }
}
