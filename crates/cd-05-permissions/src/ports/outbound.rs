//! Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::{Caller, Permission, ResourceScope};

use crate::error::AuthzError;

/// The authorization decision service (Driven Port).
///
/// Decides; never authenticates. The caller's identity and token are
/// forwarded as given.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// One decision per resource, in order: `true` iff every permission in
    /// `permissions` is granted on that resource.
    async fn evaluate(
        &self,
        caller: &Caller,
        resources: &[ResourceScope],
        permissions: &[Permission],
    ) -> Result<Vec<bool>, AuthzError>;
}
