//! Response payloads
//!
//! Field entries echo the configured field (`id`, `mapping`, `title`,
//! `datatype`, `config`, ...) and add either `options` or `data`.

use cd_03_field_registry::{FieldDescriptor, OverviewSection};
use serde::{Deserialize, Serialize};
use shared_types::Bin;
use std::collections::BTreeMap;

/// A queryable field with the values a caller may filter on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldWithOptions {
    #[serde(flatten)]
    pub field: FieldDescriptor,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFieldsSection {
    pub section_title: String,
    pub fields: Vec<FieldWithOptions>,
}

/// Response of the queryable-field listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchFieldsResponse {
    pub sections: Vec<SearchFieldsSection>,
}

impl SearchFieldsResponse {
    /// Every listed field id, in section order.
    pub fn field_ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.fields.iter().map(|f| f.field.id.as_str()))
            .collect()
    }
}

/// An overview field, with its histogram when the caller may see counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldWithData {
    #[serde(flatten)]
    pub field: FieldDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Bin>>,
}

/// Record totals per public collection.
///
/// A total is omitted when the caller has no counts permission on the
/// collection's data type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individuals: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biosamples: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiments: Option<u64>,
}

/// Response of the public overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewResponse {
    pub layout: Vec<OverviewSection>,
    pub fields: BTreeMap<String, FieldWithData>,
    pub counts: EntityCounts,
    pub max_query_parameters: u64,
    pub count_threshold: u64,
}

/// One `(field, value)` pair of a public count search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub field: String,
    pub value: String,
}

impl SearchFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Censored number of individuals matching a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCount {
    pub count: u64,
}
