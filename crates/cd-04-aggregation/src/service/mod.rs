//! Service layer for the Aggregation subsystem.

mod stats_service;

pub use stats_service::StatsService;
