//! Error types for the Binning subsystem

use thiserror::Error;

/// Errors raised while generating or parsing bins.
///
/// Generation errors reflect a mistake in the discovery configuration and are
/// fatal at load time. Parse errors reflect bad caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BinningError {
    #[error("Wrong min/max values: minimum {minimum} > maximum {maximum}")]
    MinimumAboveMaximum { minimum: i64, maximum: i64 },

    #[error("Wrong taper values: need minimum {minimum} <= taper_left {taper_left} <= taper_right {taper_right} <= maximum {maximum}")]
    TaperOutOfRange {
        minimum: i64,
        maximum: i64,
        taper_left: i64,
        taper_right: i64,
    },

    #[error("bin_size must be positive, got {0}")]
    NonPositiveBinSize(i64),

    #[error("Range between taper values ({span}) is not a multiple of bin_size {bin_size}")]
    SpanNotMultipleOfBinSize { span: i64, bin_size: i64 },

    #[error("At least 2 bin boundaries are required, got {0}")]
    TooFewBoundaries(usize),

    #[error("Bin boundaries must be strictly increasing: {previous} then {next}")]
    UnorderedBoundaries { previous: i64, next: i64 },

    #[error("Minimum {minimum} is greater than the first bin boundary {first}")]
    MinimumAboveFirstBoundary { minimum: i64, first: i64 },

    #[error("Maximum {maximum} is lower than the last bin boundary {last}")]
    MaximumBelowLastBoundary { maximum: i64, last: i64 },

    #[error("Binning dates by `{0}` is not implemented")]
    UnsupportedBinBy(String),

    #[error("Invalid year-month `{0}` (expected yyyy-mm)")]
    InvalidYearMonth(String),

    #[error("Invalid month label `{0}` (expected e.g. `Jan 2021`)")]
    InvalidMonthLabel(String),

    #[error("Invalid range label `{0}`")]
    InvalidRangeLabel(String),
}
