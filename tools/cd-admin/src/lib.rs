//! CD-Admin: Cohort Discovery admin tool
//!
//! Offline checks for a discovery document: validate it, print the bins a
//! field will produce, or run the public overview against a JSON record
//! fixture.

pub mod commands;

pub use commands::{bins_report, load_config, overview_json, validate_report, AccessLevel};
