//! Ports layer for the Aggregation subsystem.

pub mod inbound;
pub mod outbound;

pub use inbound::AggregationApi;
pub use outbound::RecordStore;
