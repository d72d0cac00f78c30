//! Domain layer for the Permissions subsystem.

pub mod disclosure;
pub mod resources;

pub use disclosure::DataTypePermissions;
pub use resources::scope_cascade;
