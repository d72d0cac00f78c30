//! Threshold resolution and application

use crate::rules::DisclosureRules;

/// Where a categorical label comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrigin {
    /// Declared by configuration (an enum). Its presence proves nothing.
    Enumerated,
    /// Observed in the data. Its presence proves at least one record.
    Derived,
}

/// Resolves effective thresholds from the configured rules.
///
/// With no discovery configuration every count is censored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CensorshipPolicy {
    configured: Option<DisclosureRules>,
}

impl CensorshipPolicy {
    pub fn new(configured: Option<DisclosureRules>) -> Self {
        Self { configured }
    }

    /// Policy for a node without discovery configuration.
    pub fn unconfigured() -> Self {
        Self { configured: None }
    }

    pub fn configured_rules(&self) -> Option<DisclosureRules> {
        self.configured
    }

    /// Counts at or below this value are rounded to 0.
    pub fn threshold(&self, low_counts_censored: bool) -> u64 {
        match self.configured {
            None => DisclosureRules::NO_PERMISSIONS.count_threshold,
            Some(rules) if low_counts_censored => rules.count_threshold,
            Some(_) => 0,
        }
    }

    pub fn max_query_parameters(&self, low_counts_censored: bool) -> u64 {
        match self.configured {
            None => DisclosureRules::NO_PERMISSIONS.max_query_parameters,
            Some(rules) if low_counts_censored => rules.max_query_parameters,
            Some(_) => DisclosureRules::FULL_PERMISSIONS.max_query_parameters,
        }
    }

    pub fn thresholded_count(&self, observed: u64, low_counts_censored: bool) -> u64 {
        self.censor(low_counts_censored).count(observed)
    }

    /// A censor bound to the threshold for one request/field.
    pub fn censor(&self, low_counts_censored: bool) -> Censor {
        Censor::with_threshold(self.threshold(low_counts_censored))
    }
}

/// Applies a single threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Censor {
    threshold: u64,
}

impl Censor {
    pub fn with_threshold(threshold: u64) -> Self {
        Self { threshold }
    }

    /// A censor that lets every count through.
    pub fn uncensored() -> Self {
        Self { threshold: 0 }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// 0 if `observed <= threshold`, otherwise `observed`.
    pub fn count(&self, observed: u64) -> u64 {
        if observed <= self.threshold {
            0
        } else {
            observed
        }
    }

    /// Censored value for a categorical label, or `None` when the label must
    /// be omitted entirely.
    pub fn label(&self, observed: u64, origin: LabelOrigin) -> Option<u64> {
        match (self.count(observed), origin) {
            (0, LabelOrigin::Derived) => None,
            (value, _) => Some(value),
        }
    }
}
