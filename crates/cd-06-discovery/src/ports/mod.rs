//! Ports layer for the Discovery subsystem.

pub mod inbound;

pub use inbound::DiscoveryApi;
