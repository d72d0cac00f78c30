//! Domain layer for the Aggregation subsystem.
//!
//! Pure bin assembly and filter conditions. No I/O, no async.

pub mod bins;
pub mod conditions;

pub use bins::{
    categorical_bins, derived_options, month_options, monthly_bins, range_bins, Groups,
};
pub use conditions::{Condition, Predicate};
