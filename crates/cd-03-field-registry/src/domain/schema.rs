//! Storage schema port
//!
//! Mappings are checked at load against the attributes the storage
//! collaborator actually exposes, so a typo fails at startup instead of on
//! the first request.

use shared_types::Collection;
use std::collections::{BTreeMap, BTreeSet};

use super::path::FieldPath;

/// Typed view of the storage collaborator's schema (Driven Port).
pub trait FieldSchema: Send + Sync {
    /// Whether `path` names something that can be aggregated.
    fn accepts(&self, path: &FieldPath) -> bool;
}

/// Schema listing the root attribute names of each collection.
///
/// Only the first segment is checked: deeper segments traverse relations or
/// free-form JSON, which the storage layer resolves itself.
#[derive(Debug, Clone, Default)]
pub struct StaticSchema {
    roots: BTreeMap<Collection, BTreeSet<String>>,
}

impl StaticSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roots<I, S>(mut self, collection: Collection, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roots
            .entry(collection)
            .or_default()
            .extend(roots.into_iter().map(Into::into));
        self
    }

    /// Attributes of the clinical/genomic record model.
    pub fn clinical() -> Self {
        Self::new()
            .with_roots(
                Collection::Individual,
                [
                    "id",
                    "date_of_birth",
                    "age_numeric",
                    "age_unit",
                    "sex",
                    "karyotypic_sex",
                    "taxonomy",
                    "active",
                    "deceased",
                    "race",
                    "ethnicity",
                    "time_at_last_encounter",
                    "extra_properties",
                    "phenopackets",
                    "biosamples",
                ],
            )
            .with_roots(
                Collection::Biosample,
                [
                    "id",
                    "individual",
                    "description",
                    "sampled_tissue",
                    "taxonomy",
                    "histological_diagnosis",
                    "tumor_progression",
                    "tumor_grade",
                    "pathological_stage",
                    "procedure",
                    "is_control_sample",
                    "measurements",
                    "extra_properties",
                    "experiment",
                ],
            )
            .with_roots(
                Collection::Experiment,
                [
                    "id",
                    "biosample",
                    "experiment_type",
                    "study_type",
                    "molecule",
                    "library_strategy",
                    "library_source",
                    "library_selection",
                    "library_layout",
                    "extraction_protocol",
                    "instrument",
                    "qc_flags",
                    "extra_properties",
                ],
            )
    }
}

impl FieldSchema for StaticSchema {
    fn accepts(&self, path: &FieldPath) -> bool {
        match (self.roots.get(&path.collection), path.segments.first()) {
            (Some(roots), Some(root)) => roots.contains(root),
            _ => false,
        }
    }
}

/// Accepts every path. For tools and fixtures that carry their own data.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveSchema;

impl FieldSchema for PermissiveSchema {
    fn accepts(&self, _path: &FieldPath) -> bool {
        true
    }
}
