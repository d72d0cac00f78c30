//! Request counters for the discovery service
//!
//! Only request and outcome totals are recorded. Counts returned to callers
//! never reach a metric.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::OutcomeKind;

/// Operation exposed by [`DiscoveryApi`](crate::DiscoveryApi).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListFields,
    Overview,
    Rules,
    Search,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListFields => "list_queryable_fields",
            Self::Overview => "public_overview",
            Self::Rules => "discovery_rules",
            Self::Search => "public_search",
        }
    }
}

/// Thread-safe counters for discovery requests.
#[derive(Debug, Default)]
pub struct DiscoveryMetrics {
    pub list_fields_requests: AtomicU64,
    pub overview_requests: AtomicU64,
    pub rules_requests: AtomicU64,
    pub search_requests: AtomicU64,
    pub successes: AtomicU64,
    pub not_configured: AtomicU64,
    pub forbidden: AtomicU64,
    pub errors: AtomicU64,
}

impl DiscoveryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, operation: Operation) {
        let counter = match operation {
            Operation::ListFields => &self.list_fields_requests,
            Operation::Overview => &self.overview_requests,
            Operation::Rules => &self.rules_requests,
            Operation::Search => &self.search_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: OutcomeKind) {
        let counter = match outcome {
            OutcomeKind::Success => &self.successes,
            OutcomeKind::NotConfigured => &self.not_configured,
            OutcomeKind::Forbidden => &self.forbidden,
            OutcomeKind::Error => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current values. Authorization failures are tracked by the permission
    /// composer and passed in.
    pub fn snapshot(&self, authorization_failures: u64) -> MetricsSnapshot {
        MetricsSnapshot {
            list_fields_requests: self.list_fields_requests.load(Ordering::Relaxed),
            overview_requests: self.overview_requests.load(Ordering::Relaxed),
            rules_requests: self.rules_requests.load(Ordering::Relaxed),
            search_requests: self.search_requests.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            not_configured: self.not_configured.load(Ordering::Relaxed),
            forbidden: self.forbidden.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            authorization_failures,
        }
    }
}

/// Point-in-time copy of [`DiscoveryMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub list_fields_requests: u64,
    pub overview_requests: u64,
    pub rules_requests: u64,
    pub search_requests: u64,
    pub successes: u64,
    pub not_configured: u64,
    pub forbidden: u64,
    pub errors: u64,
    pub authorization_failures: u64,
}

impl MetricsSnapshot {
    pub fn total_requests(&self) -> u64 {
        self.list_fields_requests + self.overview_requests + self.rules_requests + self.search_requests
    }
}
