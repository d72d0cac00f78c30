//! # Callers, Resources and Permissions
//!
//! Shapes exchanged with the authorization collaborator and carried through a
//! discovery request.
//!
//! ## Security Properties
//!
//! - **Fail-closed default**: `DataTypePermission::default()` grants nothing.
//! - **Data implies counts**: every constructor enforces `data ⇒ counts`.
//! - **No credential leakage**: `Caller`'s `Debug` output redacts the token.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::entities::DataType;
use crate::errors::EntityParseError;

// =============================================================================
// CALLER
// =============================================================================

/// Project/dataset narrowing requested by a caller.
///
/// An empty scope asks about the whole node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscoveryScope {
    pub project: Option<String>,
    pub dataset: Option<String>,
}

impl DiscoveryScope {
    /// Node-wide scope.
    pub fn node() -> Self {
        Self::default()
    }

    pub fn project(project: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            dataset: None,
        }
    }

    pub fn dataset(project: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            project: Some(project.into()),
            dataset: Some(dataset.into()),
        }
    }

    /// A dataset without a project cannot be expressed as a resource, so the
    /// dataset is only honoured when a project is present.
    pub fn is_dataset_level(&self) -> bool {
        self.project.is_some() && self.dataset.is_some()
    }
}

/// Identity of the party asking for discovery data.
///
/// Authentication happens upstream; this is only what the authorization
/// collaborator needs to make a decision.
#[derive(Clone, Default)]
pub struct Caller {
    /// Subject identifier, `None` for anonymous callers.
    pub principal: Option<String>,
    /// Bearer token forwarded to the authorization service.
    pub bearer_token: Option<String>,
    /// Resource scope the caller is asking about.
    pub scope: DiscoveryScope,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_principal(principal: impl Into<String>) -> Self {
        Self {
            principal: Some(principal.into()),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn in_scope(mut self, scope: DiscoveryScope) -> Self {
        self.scope = scope;
        self
    }
}

impl fmt::Debug for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caller")
            .field("principal", &self.principal)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("scope", &self.scope)
            .finish()
    }
}

// =============================================================================
// RESOURCES
// =============================================================================

/// A hierarchical resource descriptor, broadest first.
///
/// Serializes to the authorization service's object form, e.g.
/// `{"everything": true}` or `{"project": "p1", "data_type": "experiment"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceScope {
    /// The whole node.
    Everything,
    Project {
        project: String,
    },
    Dataset {
        project: String,
        dataset: String,
    },
    /// A single data type inside a project (and optionally a dataset).
    DataType {
        project: String,
        dataset: Option<String>,
        data_type: DataType,
    },
}

impl ResourceScope {
    /// Whether a grant on `self` also covers `other`.
    pub fn contains(&self, other: &ResourceScope) -> bool {
        match (self, other) {
            (Self::Everything, _) => true,
            (_, Self::Everything) => false,
            (Self::Project { project: p }, other) => other.project() == Some(p.as_str()),
            (Self::Dataset { .. }, Self::Project { .. }) => false,
            (Self::Dataset { project: p, dataset: d }, other) => {
                other.project() == Some(p.as_str()) && other.dataset() == Some(d.as_str())
            }
            (Self::DataType { .. }, Self::Project { .. } | Self::Dataset { .. }) => false,
            (
                Self::DataType {
                    project: p,
                    dataset: d,
                    data_type: t,
                },
                Self::DataType {
                    project: op,
                    dataset: od,
                    data_type: ot,
                },
            ) => p == op && t == ot && (d.is_none() || d == od),
        }
    }

    fn project(&self) -> Option<&str> {
        match self {
            Self::Everything => None,
            Self::Project { project } | Self::Dataset { project, .. } | Self::DataType { project, .. } => {
                Some(project.as_str())
            }
        }
    }

    fn dataset(&self) -> Option<&str> {
        match self {
            Self::Dataset { dataset, .. } => Some(dataset.as_str()),
            Self::DataType { dataset, .. } => dataset.as_deref(),
            _ => None,
        }
    }
}

impl Serialize for ResourceScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Everything => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("everything", &true)?;
                map.end()
            }
            Self::Project { project } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("project", project)?;
                map.end()
            }
            Self::Dataset { project, dataset } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("project", project)?;
                map.serialize_entry("dataset", dataset)?;
                map.end()
            }
            Self::DataType {
                project,
                dataset,
                data_type,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("project", project)?;
                if let Some(dataset) = dataset {
                    map.serialize_entry("dataset", dataset)?;
                }
                map.serialize_entry("data_type", data_type)?;
                map.end()
            }
        }
    }
}

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Permissions consulted by discovery.
///
/// There is no node-level counts permission: counts are granted at project
/// or dataset level, while `query:data` applies at every level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "query:data")]
    QueryData,
    #[serde(rename = "query:project_level_counts")]
    QueryProjectLevelCounts,
    #[serde(rename = "query:dataset_level_counts")]
    QueryDatasetLevelCounts,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryData => "query:data",
            Self::QueryProjectLevelCounts => "query:project_level_counts",
            Self::QueryDatasetLevelCounts => "query:dataset_level_counts",
        }
    }

    /// Counts permission appropriate for the requested scope level.
    pub fn counts_for(scope: &DiscoveryScope) -> Self {
        if scope.is_dataset_level() {
            Self::QueryDatasetLevelCounts
        } else {
            Self::QueryProjectLevelCounts
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = EntityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query:data" => Ok(Self::QueryData),
            "query:project_level_counts" => Ok(Self::QueryProjectLevelCounts),
            "query:dataset_level_counts" => Ok(Self::QueryDatasetLevelCounts),
            other => Err(EntityParseError::UnknownPermission(other.to_string())),
        }
    }
}

/// Visibility a caller has on one data type for one request.
///
/// Invariant: `data ⇒ counts`. Deserialization rejects payloads that break it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PermissionFlags")]
pub struct DataTypePermission {
    counts: bool,
    data: bool,
}

/// Unchecked wire shape of [`DataTypePermission`].
#[derive(Deserialize)]
struct PermissionFlags {
    counts: bool,
    data: bool,
}

impl TryFrom<PermissionFlags> for DataTypePermission {
    type Error = EntityParseError;

    fn try_from(flags: PermissionFlags) -> Result<Self, Self::Error> {
        if flags.data && !flags.counts {
            return Err(EntityParseError::DataWithoutCounts);
        }
        Ok(Self::new(flags.counts, flags.data))
    }
}

impl DataTypePermission {
    /// No visibility at all.
    pub const NONE: Self = Self {
        counts: false,
        data: false,
    };

    /// Aggregate counts only.
    pub const COUNTS: Self = Self {
        counts: true,
        data: false,
    };

    /// Full record visibility (and therefore counts).
    pub const FULL: Self = Self {
        counts: true,
        data: true,
    };

    pub fn new(counts: bool, data: bool) -> Self {
        Self {
            counts: counts || data,
            data,
        }
    }

    pub fn counts(&self) -> bool {
        self.counts
    }

    pub fn data(&self) -> bool {
        self.data
    }

    /// Small counts must be censored unless the caller can see full data.
    pub fn low_counts_censored(&self) -> bool {
        !self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_implies_counts() {
        let permission = DataTypePermission::new(false, true);
        assert!(permission.counts());
        assert!(permission.data());
        assert_eq!(permission, DataTypePermission::FULL);
    }

    #[test]
    fn test_deserialization_enforces_data_implies_counts() {
        let full: DataTypePermission = serde_json::from_value(serde_json::json!({"counts": true, "data": true})).unwrap();
        assert_eq!(full, DataTypePermission::FULL);

        let counts: DataTypePermission =
            serde_json::from_value(serde_json::json!({"counts": true, "data": false})).unwrap();
        assert_eq!(counts, DataTypePermission::COUNTS);

        let inconsistent = serde_json::from_value::<DataTypePermission>(serde_json::json!({"counts": false, "data": true}));
        assert!(inconsistent.is_err());
    }

    #[test]
    fn test_default_permission_is_closed() {
        let permission = DataTypePermission::default();
        assert!(!permission.counts());
        assert!(!permission.data());
        assert!(permission.low_counts_censored());
    }

    #[test]
    fn test_resource_serialization_matches_authz_wire_format() {
        let everything = serde_json::to_value(ResourceScope::Everything).unwrap();
        assert_eq!(everything, serde_json::json!({"everything": true}));

        let item = serde_json::to_value(ResourceScope::DataType {
            project: "p1".into(),
            dataset: None,
            data_type: DataType::Experiment,
        })
        .unwrap();
        assert_eq!(item, serde_json::json!({"project": "p1", "data_type": "experiment"}));
    }

    #[test]
    fn test_resource_containment() {
        let project = ResourceScope::Project {
            project: "p1".into(),
        };
        let dataset = ResourceScope::Dataset {
            project: "p1".into(),
            dataset: "d1".into(),
        };
        let item = ResourceScope::DataType {
            project: "p1".into(),
            dataset: Some("d1".into()),
            data_type: DataType::Phenopacket,
        };
        let other_project = ResourceScope::Project {
            project: "p2".into(),
        };

        assert!(ResourceScope::Everything.contains(&item));
        assert!(project.contains(&dataset));
        assert!(project.contains(&item));
        assert!(dataset.contains(&item));
        assert!(!dataset.contains(&project));
        assert!(!item.contains(&dataset));
        assert!(!other_project.contains(&item));
        assert!(!project.contains(&ResourceScope::Everything));
    }

    #[test]
    fn test_counts_permission_level_follows_scope() {
        assert_eq!(
            Permission::counts_for(&DiscoveryScope::node()),
            Permission::QueryProjectLevelCounts
        );
        assert_eq!(
            Permission::counts_for(&DiscoveryScope::dataset("p", "d")),
            Permission::QueryDatasetLevelCounts
        );
    }

    #[test]
    fn test_caller_debug_redacts_token() {
        let caller = Caller::with_principal("alice").with_token("secret-token");
        let rendered = format!("{:?}", caller);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
