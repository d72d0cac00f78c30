//! Ports layer for the Permissions subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::PermissionApi;
pub use outbound::AuthorizationService;
