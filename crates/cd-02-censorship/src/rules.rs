//! Disclosure rules and their privilege tiers

use serde::{Deserialize, Serialize};

/// Stand-in for "no limit". Kept within the signed 64-bit range so that it
/// survives JSON consumers that parse integers as `i64`.
pub const UNBOUNDED: u64 = i64::MAX as u64;

/// How much aggregate information a caller may receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureRules {
    /// Maximum number of filters in one public query.
    pub max_query_parameters: u64,
    /// Counts at or below this value are reported as 0.
    pub count_threshold: u64,
}

impl DisclosureRules {
    /// No counts can be seen and no parameters may be used.
    pub const NO_PERMISSIONS: Self = Self {
        max_query_parameters: 0,
        count_threshold: UNBOUNDED,
    };

    /// Nothing is censored and queries are unrestricted.
    pub const FULL_PERMISSIONS: Self = Self {
        max_query_parameters: UNBOUNDED,
        count_threshold: 0,
    };

    pub fn new(max_query_parameters: u64, count_threshold: u64) -> Self {
        Self {
            max_query_parameters,
            count_threshold,
        }
    }

    /// Whether `self` is at least as permissive as `other` on both axes.
    pub fn at_least_as_permissive_as(&self, other: &Self) -> bool {
        self.count_threshold <= other.count_threshold
            && self.max_query_parameters >= other.max_query_parameters
    }
}

/// Privilege tier a set of permissions resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisclosureTier {
    /// Some implicated data type lacks counts permission.
    NoPermissions,
    /// Counts everywhere, full data somewhere short of everywhere.
    ConfiguredPartial,
    /// Full data on every implicated data type.
    FullPermissions,
}

impl DisclosureTier {
    /// Concrete rules for this tier given the configured partial rules.
    pub fn rules(&self, configured: DisclosureRules) -> DisclosureRules {
        match self {
            Self::NoPermissions => DisclosureRules::NO_PERMISSIONS,
            Self::ConfiguredPartial => configured,
            Self::FullPermissions => DisclosureRules::FULL_PERMISSIONS,
        }
    }
}
