//! # CD-05 Permissions
//!
//! Works out, for one request, what a caller may see of each data type.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`):
//!   - `resources`: the broad-to-narrow resource cascade for a scope
//!   - `disclosure`: per-data-type permission maps, their conjunction and the
//!     resulting disclosure tier
//! - **Ports Layer** (`ports/`):
//!   - `PermissionApi` (inbound)
//!   - `AuthorizationService` (outbound)
//! - **Service Layer** (`service/`): `PermissionComposer`
//! - **Adapters** (`adapters/`): `StaticPolicyAuthorizer`
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: `data ⇒ counts` for every resolved permission.
//! - **INVARIANT-2**: Fail closed. An authorization error or timeout yields
//!   no permissions for the affected data type and is never retried.
//! - **INVARIANT-3**: A query is governed by its least-privileged data type:
//!   counts on all of them or nothing, full rules only with data on all.
//! - **INVARIANT-4**: Permissions are resolved per request and never cached.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{Grant, StaticPolicyAuthorizer, Subject};
pub use domain::{scope_cascade, DataTypePermissions};
pub use error::AuthzError;
pub use ports::{AuthorizationService, PermissionApi};
pub use service::{PermissionComposer, DEFAULT_AUTHZ_TIMEOUT};
