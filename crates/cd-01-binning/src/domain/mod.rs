//! Domain Layer - Pure binning logic
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Validate fully before emitting

pub mod labels;
pub mod monthly;
pub mod numeric;

pub use labels::parse_range_label;
pub use monthly::{months_between, DateBinBy, MonthRange, YearMonth, YEAR_MONTH_LEN};
pub use numeric::{AutoBinning, BinSpec, CustomBinning, NumericBinning};
