//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Records**: `Collection`, `DataType`
//! - **Aggregates**: `Bin`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::EntityParseError;

// =============================================================================
// CLUSTER A: RECORDS
// =============================================================================

/// A logical category of record used as the unit of permission.
///
/// Individuals and biosamples both belong to the `phenopacket` data type;
/// experiments are their own data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Clinical records (individuals, biosamples).
    Phenopacket,
    /// Experiment records.
    Experiment,
}

impl DataType {
    /// Every data type exposed through public discovery.
    pub const ALL: [DataType; 2] = [DataType::Phenopacket, DataType::Experiment];

    /// Wire identifier used by the authorization service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phenopacket => "phenopacket",
            Self::Experiment => "experiment",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = EntityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phenopacket" => Ok(Self::Phenopacket),
            "experiment" => Ok(Self::Experiment),
            other => Err(EntityParseError::UnknownDataType(other.to_string())),
        }
    }
}

/// A top-level record collection in the storage collaborator.
///
/// The first segment of every field mapping names one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Individual,
    Biosample,
    Experiment,
}

impl Collection {
    /// Collections whose totals appear in the public overview.
    pub const ALL: [Collection; 3] = [
        Collection::Individual,
        Collection::Biosample,
        Collection::Experiment,
    ];

    /// The data type whose permissions govern this collection.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::Individual | Self::Biosample => DataType::Phenopacket,
            Self::Experiment => DataType::Experiment,
        }
    }

    /// Mapping prefix, e.g. `individual` in `individual/sex`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Biosample => "biosample",
            Self::Experiment => "experiment",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = EntityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "biosample" => Ok(Self::Biosample),
            "experiment" => Ok(Self::Experiment),
            other => Err(EntityParseError::UnknownCollection(other.to_string())),
        }
    }
}

// =============================================================================
// CLUSTER B: AGGREGATES
// =============================================================================

/// One labelled interval or category with its censored count.
///
/// `value` is either 0 or strictly above the threshold that was in force
/// when it was produced. A masked value in `(0, threshold]` never appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub label: String,
    pub value: u64,
}

impl Bin {
    pub fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Label of the bucket collecting records with no usable value.
pub const MISSING_LABEL: &str = "missing";
