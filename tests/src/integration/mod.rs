//! Cross-subsystem tests.

pub mod flows;
pub mod scenarios;
