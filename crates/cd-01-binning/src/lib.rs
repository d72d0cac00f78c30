//! # CD-01 Binning
//!
//! Pure generators for the bins that discovery histograms are built on.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure functions, no I/O, no async
//!   - `numeric`: auto-binning (tapered uniform widths) and custom boundaries
//!   - `monthly`: calendar-month iteration and `"Jan 2021"` labels
//!   - `labels`: parsing bin labels back into ranges for search filters
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: The bins generated for one field partition the domain:
//!   `bins[i].ceil == bins[i + 1].floor`, no gaps and no overlaps.
//! - **INVARIANT-2**: The month sequence between two observed months contains
//!   every calendar month, so date histograms have no silent gaps.
//! - **INVARIANT-3**: Malformed binning is rejected before anything is
//!   emitted. These are authoring errors in the configuration, never user input.
//!
//! ## Usage Example
//!
//! ```ignore
//! use cd_01_binning::{AutoBinning, NumericBinning};
//!
//! let binning = NumericBinning::Auto(AutoBinning {
//!     minimum: 0,
//!     maximum: 100,
//!     taper_left: 10,
//!     taper_right: 90,
//!     bin_size: 10,
//! });
//! let bins = binning.bins()?;
//! assert_eq!(bins[0].label, "< 10");
//! ```

pub mod domain;
pub mod error;

pub use domain::{
    months_between, parse_range_label, AutoBinning, BinSpec, CustomBinning, DateBinBy,
    MonthRange, NumericBinning, YearMonth, YEAR_MONTH_LEN,
};
pub use error::BinningError;
