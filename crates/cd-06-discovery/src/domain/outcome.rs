//! Request outcomes

/// Message returned when no search fields are configured.
pub const NO_PUBLIC_FIELDS_CONFIGURED: &str = "No public fields configured.";

/// Message returned when no overview is configured.
pub const NO_PUBLIC_DATA_AVAILABLE: &str = "No public data available.";

/// Terminal state of one discovery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome<T> {
    /// Discovery has no configuration on this node.
    NotConfigured(&'static str),
    /// The caller may not see counts for anything involved.
    Forbidden,
    Success(T),
}

impl<T> DiscoveryOutcome<T> {
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::NotConfigured(_) => OutcomeKind::NotConfigured,
            Self::Forbidden => OutcomeKind::Forbidden,
            Self::Success(_) => OutcomeKind::Success,
        }
    }
}

/// Outcome without its payload, for metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    NotConfigured,
    Forbidden,
    Error,
}
