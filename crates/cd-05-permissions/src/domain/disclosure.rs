//! Permission maps and disclosure derivation

use cd_02_censorship::DisclosureTier;
use shared_types::{DataType, DataTypePermission};
use std::collections::{BTreeMap, BTreeSet};

/// A caller's permissions for one request, by data type.
///
/// Data types that were not resolved have no permissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTypePermissions {
    by_type: BTreeMap<DataType, DataTypePermission>,
}

impl DataTypePermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, data_type: DataType, permission: DataTypePermission) -> Self {
        self.insert(data_type, permission);
        self
    }

    pub fn insert(&mut self, data_type: DataType, permission: DataTypePermission) {
        self.by_type.insert(data_type, permission);
    }

    pub fn get(&self, data_type: DataType) -> DataTypePermission {
        self.by_type.get(&data_type).copied().unwrap_or_default()
    }

    /// Whether any data type grants at least counts.
    pub fn any_counts(&self) -> bool {
        self.by_type.values().any(DataTypePermission::counts)
    }

    /// Permission held on every one of `implicated`.
    ///
    /// Access is gated by the least-privileged data type. An empty set grants
    /// nothing.
    pub fn conjunction(&self, implicated: &BTreeSet<DataType>) -> DataTypePermission {
        if implicated.is_empty() {
            return DataTypePermission::NONE;
        }
        DataTypePermission::new(
            implicated.iter().all(|dt| self.get(*dt).counts()),
            implicated.iter().all(|dt| self.get(*dt).data()),
        )
    }

    /// Disclosure tier for a query touching `implicated`.
    pub fn tier(&self, implicated: &BTreeSet<DataType>) -> DisclosureTier {
        let joint = self.conjunction(implicated);
        if !joint.counts() {
            DisclosureTier::NoPermissions
        } else if joint.data() {
            DisclosureTier::FullPermissions
        } else {
            DisclosureTier::ConfiguredPartial
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DataType, DataTypePermission)> + '_ {
        self.by_type.iter().map(|(dt, p)| (*dt, *p))
    }
}

impl FromIterator<(DataType, DataTypePermission)> for DataTypePermissions {
    fn from_iter<I: IntoIterator<Item = (DataType, DataTypePermission)>>(iter: I) -> Self {
        Self {
            by_type: iter.into_iter().collect(),
        }
    }
}
