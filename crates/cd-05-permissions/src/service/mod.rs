//! Service layer for the Permissions subsystem.

mod composer;

pub use composer::{PermissionComposer, DEFAULT_AUTHZ_TIMEOUT};
