//! Static policy authorizer
//!
//! An in-process `AuthorizationService` answering from a fixed list of
//! grants. Used by the admin tool and by tests; production deployments talk
//! to the real authorization service instead.

use async_trait::async_trait;
use shared_types::{Caller, Permission, ResourceScope};
use std::collections::BTreeSet;

use crate::error::AuthzError;
use crate::ports::AuthorizationService;

/// Who a grant applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// Every caller, anonymous ones included.
    Everyone,
    /// A single authenticated principal.
    Principal(String),
}

impl Subject {
    fn matches(&self, caller: &Caller) -> bool {
        match self {
            Self::Everyone => true,
            Self::Principal(principal) => caller.principal.as_deref() == Some(principal.as_str()),
        }
    }
}

/// Permissions granted to a subject on a resource and everything inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub subject: Subject,
    pub resource: ResourceScope,
    pub permissions: BTreeSet<Permission>,
}

/// Authorizer answering from a fixed set of grants.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicyAuthorizer {
    grants: Vec<Grant>,
}

impl StaticPolicyAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grant(
        mut self,
        subject: Subject,
        resource: ResourceScope,
        permissions: impl IntoIterator<Item = Permission>,
    ) -> Self {
        self.grants.push(Grant {
            subject,
            resource,
            permissions: permissions.into_iter().collect(),
        });
        self
    }

    /// Everyone may see counts, at every level, on the whole node.
    pub fn counts_for_everyone() -> Self {
        Self::new().with_grant(
            Subject::Everyone,
            ResourceScope::Everything,
            [Permission::QueryProjectLevelCounts, Permission::QueryDatasetLevelCounts],
        )
    }

    /// Everyone may see everything on the node.
    pub fn data_for_everyone() -> Self {
        Self::counts_for_everyone().with_grant(
            Subject::Everyone,
            ResourceScope::Everything,
            [Permission::QueryData],
        )
    }

    fn is_granted(&self, caller: &Caller, resource: &ResourceScope, permission: Permission) -> bool {
        self.grants.iter().any(|grant| {
            grant.subject.matches(caller)
                && grant.permissions.contains(&permission)
                && grant.resource.contains(resource)
        })
    }
}

#[async_trait]
impl AuthorizationService for StaticPolicyAuthorizer {
    async fn evaluate(
        &self,
        caller: &Caller,
        resources: &[ResourceScope],
        permissions: &[Permission],
    ) -> Result<Vec<bool>, AuthzError> {
        Ok(resources
            .iter()
            .map(|resource| {
                permissions
                    .iter()
                    .all(|permission| self.is_granted(caller, resource, *permission))
            })
            .collect())
    }
}
