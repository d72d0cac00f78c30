//! Permission Composer
//!
//! Per data type, two questions are put to the authorization service:
//!
//! 1. Does the caller hold `query:data` anywhere on the scope cascade? Asked
//!    one resource at a time, broadest first, stopping at the first grant.
//! 2. Otherwise, does the caller hold the counts permission anywhere on the
//!    cascade? Asked in a single batch.
//!
//! Distinct data types are resolved concurrently. Nothing is retried; a
//! failure or timeout leaves that data type with no permissions.

use async_trait::async_trait;
use futures::future::join_all;
use futures::{stream, StreamExt, TryStreamExt};
use shared_types::{Caller, DataType, DataTypePermission, Permission, ResourceScope};
use std::collections::BTreeSet;
use std::future::ready;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::{scope_cascade, DataTypePermissions};
use crate::error::AuthzError;
use crate::ports::{AuthorizationService, PermissionApi};

/// Default time allowed for one authorization round trip.
pub const DEFAULT_AUTHZ_TIMEOUT: Duration = Duration::from_secs(5);

/// Composes per-data-type permissions from authorization decisions.
pub struct PermissionComposer<A: AuthorizationService> {
    authz: Arc<A>,
    timeout: Duration,
    failures: AtomicU64,
}

impl<A: AuthorizationService> PermissionComposer<A> {
    pub fn new(authz: Arc<A>) -> Self {
        Self {
            authz,
            timeout: DEFAULT_AUTHZ_TIMEOUT,
            failures: AtomicU64::new(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lookups that failed closed since startup.
    pub fn authorization_failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    async fn evaluate(
        &self,
        caller: &Caller,
        resources: &[ResourceScope],
        permission: Permission,
    ) -> Result<Vec<bool>, AuthzError> {
        let decisions = timeout(self.timeout, self.authz.evaluate(caller, resources, &[permission]))
            .await
            .map_err(|_| AuthzError::Timeout(self.timeout))??;

        if decisions.len() != resources.len() {
            return Err(AuthzError::MalformedAnswer {
                expected: resources.len(),
                got: decisions.len(),
            });
        }
        Ok(decisions)
    }

    /// `query:data` on the first resource of the cascade that grants it.
    async fn has_data(&self, caller: &Caller, cascade: &[ResourceScope]) -> Result<bool, AuthzError> {
        let granted = stream::iter(cascade)
            .then(|resource| async move {
                let decisions = self
                    .evaluate(caller, std::slice::from_ref(resource), Permission::QueryData)
                    .await?;
                Ok::<bool, AuthzError>(decisions.into_iter().all(|d| d))
            })
            .try_skip_while(|granted| ready(Ok(!granted)))
            .boxed();
        futures::pin_mut!(granted);

        Ok(granted.try_next().await?.is_some())
    }

    async fn has_counts(&self, caller: &Caller, cascade: &[ResourceScope]) -> Result<bool, AuthzError> {
        let permission = Permission::counts_for(&caller.scope);
        let decisions = self.evaluate(caller, cascade, permission).await?;
        Ok(decisions.into_iter().any(|d| d))
    }

    async fn resolve_one(&self, caller: &Caller, data_type: DataType) -> Result<DataTypePermission, AuthzError> {
        let cascade = scope_cascade(&caller.scope, data_type);

        if self.has_data(caller, &cascade).await? {
            return Ok(DataTypePermission::FULL);
        }
        let counts = self.has_counts(caller, &cascade).await?;
        Ok(DataTypePermission::new(counts, false))
    }
}

#[async_trait]
impl<A: AuthorizationService + 'static> PermissionApi for PermissionComposer<A> {
    async fn resolve(&self, caller: &Caller, data_types: &BTreeSet<DataType>) -> DataTypePermissions {
        let lookups = data_types.iter().map(|&data_type| async move {
            let permission = match self.resolve_one(caller, data_type).await {
                Ok(permission) => permission,
                Err(e) => {
                    self.failures.fetch_add(1, Ordering::Relaxed);
                    warn!(data_type = %data_type, error = %e, "Authorization lookup failed, denying");
                    DataTypePermission::NONE
                }
            };
            debug!(
                data_type = %data_type,
                counts = permission.counts(),
                data = permission.data(),
                "Resolved data type permission"
            );
            (data_type, permission)
        });

        join_all(lookups).await.into_iter().collect()
    }
}
