//! The write-once field registry
//!
//! Built once from a [`DiscoveryDocument`] and then shared read-only (behind
//! an `Arc`) by every request. Every mapping, binning and section reference
//! is checked here so nothing is re-validated per call.

use cd_01_binning::{DateBinBy, NumericBinning};
use cd_02_censorship::DisclosureRules;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{Collection, DataType};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::domain::{
    DiscoveryDocument, FieldDatatype, FieldDescriptor, FieldKind, FieldPath, FieldSchema,
    OverviewSection, PathParseError, RawField, SearchSection,
};
use crate::error::ConfigurationError;

#[derive(Deserialize)]
struct StringConfig {
    #[serde(default, rename = "enum")]
    enum_values: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct DateConfig {
    bin_by: String,
}

/// Validated, immutable discovery configuration.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    overview: Vec<OverviewSection>,
    search: Vec<SearchSection>,
    fields: BTreeMap<String, FieldDescriptor>,
    rules: DisclosureRules,
}

impl FieldRegistry {
    /// Validate `document` against `schema`.
    pub fn new(
        document: DiscoveryDocument,
        schema: &dyn FieldSchema,
    ) -> Result<Self, ConfigurationError> {
        let DiscoveryDocument {
            overview,
            search,
            fields,
            rules,
        } = document;

        let fields = fields
            .into_iter()
            .map(|(id, raw)| {
                let descriptor = build_descriptor(id.clone(), raw, schema)?;
                Ok((id, descriptor))
            })
            .collect::<Result<BTreeMap<_, _>, ConfigurationError>>()?;

        for section in &overview {
            for chart in &section.charts {
                if !fields.contains_key(&chart.field) {
                    return Err(ConfigurationError::UnknownFieldReference {
                        section: section.section_title.clone(),
                        field: chart.field.clone(),
                    });
                }
            }
        }

        for section in &search {
            for id in &section.fields {
                let field = fields.get(id).ok_or_else(|| {
                    ConfigurationError::UnknownFieldReference {
                        section: section.section_title.clone(),
                        field: id.clone(),
                    }
                })?;
                if field.search_path.collection != Collection::Individual {
                    return Err(ConfigurationError::NotSearchable {
                        field: id.clone(),
                        path: field.search_path.to_string(),
                    });
                }
            }
        }

        info!(
            fields = fields.len(),
            overview_sections = overview.len(),
            search_sections = search.len(),
            count_threshold = rules.count_threshold,
            max_query_parameters = rules.max_query_parameters,
            "Discovery configuration loaded"
        );

        Ok(Self {
            overview,
            search,
            fields,
            rules,
        })
    }

    /// Parse and validate a JSON document. `Ok(None)` when not configured.
    pub fn from_json(
        json: &str,
        schema: &dyn FieldSchema,
    ) -> Result<Option<Self>, ConfigurationError> {
        DiscoveryDocument::from_json(json)?
            .map(|document| Self::new(document, schema))
            .transpose()
    }

    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.get(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    pub fn overview(&self) -> &[OverviewSection] {
        &self.overview
    }

    pub fn search(&self) -> &[SearchSection] {
        &self.search
    }

    /// Configured (partial) disclosure rules.
    pub fn rules(&self) -> DisclosureRules {
        self.rules
    }

    /// Whether the field appears in a search section.
    pub fn is_queryable(&self, id: &str) -> bool {
        self.search
            .iter()
            .any(|section| section.fields.iter().any(|f| f == id))
    }

    /// Fields of all search sections, in section order, without repeats.
    pub fn queryable_fields(&self) -> Vec<&FieldDescriptor> {
        self.dedup(self.search.iter().flat_map(|s| s.fields.iter()))
    }

    /// Fields charted in the overview, in layout order, without repeats.
    pub fn overview_fields(&self) -> Vec<&FieldDescriptor> {
        self.dedup(
            self.overview
                .iter()
                .flat_map(|s| s.charts.iter().map(|c| &c.field)),
        )
    }

    fn dedup<'a>(&'a self, ids: impl Iterator<Item = &'a String>) -> Vec<&'a FieldDescriptor> {
        let mut seen = BTreeSet::new();
        ids.filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.fields.get(id))
            .collect()
    }
}

/// Data types implicated by a set of fields.
pub fn data_types_of<'a>(fields: impl IntoIterator<Item = &'a FieldDescriptor>) -> BTreeSet<DataType> {
    fields.into_iter().map(FieldDescriptor::data_type).collect()
}

fn parse_path(
    field: &str,
    mapping: &str,
    schema: &dyn FieldSchema,
) -> Result<FieldPath, ConfigurationError> {
    let path = FieldPath::parse(mapping).map_err(|e| match e {
        PathParseError::Malformed => ConfigurationError::MalformedMapping {
            field: field.to_string(),
            mapping: mapping.to_string(),
        },
        PathParseError::UnknownCollection(prefix) => ConfigurationError::UnknownCollection {
            field: field.to_string(),
            prefix,
        },
    })?;

    if !schema.accepts(&path) {
        return Err(ConfigurationError::UnknownPath {
            field: field.to_string(),
            path: path.to_string(),
        });
    }

    Ok(path)
}

fn build_descriptor(
    id: String,
    raw: RawField,
    schema: &dyn FieldSchema,
) -> Result<FieldDescriptor, ConfigurationError> {
    let path = parse_path(&id, &raw.mapping, schema)?;
    let search_path = match &raw.mapping_for_search_filter {
        Some(mapping) => parse_path(&id, mapping, schema)?,
        None => path.clone(),
    };

    let kind = build_kind(&id, raw.datatype, &raw.config)?;
    debug!(field_id = %id, path = %path, datatype = ?raw.datatype, "Field registered");

    Ok(FieldDescriptor {
        id,
        mapping: raw.mapping,
        mapping_for_search_filter: raw.mapping_for_search_filter,
        title: raw.title,
        description: raw.description,
        datatype: raw.datatype,
        config: raw.config,
        kind,
        path,
        search_path,
    })
}

fn build_kind(id: &str, datatype: FieldDatatype, config: &Value) -> Result<FieldKind, ConfigurationError> {
    let invalid = |e: serde_json::Error| ConfigurationError::InvalidFieldConfig {
        field: id.to_string(),
        reason: e.to_string(),
    };
    let invalid_binning = |source| ConfigurationError::InvalidBinning {
        field: id.to_string(),
        source,
    };

    match datatype {
        FieldDatatype::String => {
            let StringConfig { enum_values } =
                StringConfig::deserialize(config).map_err(invalid)?;
            Ok(FieldKind::String { enum_values })
        }
        FieldDatatype::Number => {
            let binning = NumericBinning::deserialize(config).map_err(invalid)?;
            let bins = binning.bins().map_err(invalid_binning)?;
            let units = config
                .get("units")
                .and_then(Value::as_str)
                .map(str::to_string);
            Ok(FieldKind::Number {
                units,
                binning,
                bins,
            })
        }
        FieldDatatype::Date => {
            let DateConfig { bin_by } = DateConfig::deserialize(config).map_err(invalid)?;
            let bin_by: DateBinBy = bin_by.parse().map_err(invalid_binning)?;
            Ok(FieldKind::Date { bin_by })
        }
    }
}
