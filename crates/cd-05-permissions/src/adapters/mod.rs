//! Adapters for the Permissions subsystem.

pub mod static_policy;

pub use static_policy::{Grant, StaticPolicyAuthorizer, Subject};
