//! Calendar-month iteration for date histograms
//!
//! Dates are stored as ISO strings; a month key is their first seven
//! characters (`yyyy-mm`). The range between the first and last observed
//! month is walked month by month so that empty months still get a bin.
//! Only months between [`YearMonth::EARLIEST`] and [`YearMonth::LATEST`]
//! are histogrammed, which bounds the number of bins a single outlying
//! date can produce.

use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BinningError;

/// Length of a `yyyy-mm` key.
pub const YEAR_MONTH_LEN: usize = 7;

/// Strategy for binning date fields. Only monthly binning exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBinBy {
    Month,
}

impl FromStr for DateBinBy {
    type Err = BinningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            other => Err(BinningError::UnsupportedBinBy(other.to_string())),
        }
    }
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// First month a date histogram covers.
    pub const EARLIEST: Self = Self { year: 1900, month: 1 };

    /// Last month a date histogram covers.
    pub const LATEST: Self = Self { year: 2100, month: 12 };

    pub fn new(year: i32, month: u32) -> Result<Self, BinningError> {
        if !(1..=12).contains(&month) {
            return Err(BinningError::InvalidYearMonth(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Month key of an ISO date string (`2021-03-09` → `2021-03`).
    pub fn from_iso_date(date: &str) -> Result<Self, BinningError> {
        date.get(..YEAR_MONTH_LEN)
            .ok_or_else(|| BinningError::InvalidYearMonth(date.to_string()))?
            .parse()
    }

    /// Parse a display label such as `May 2022`.
    pub fn from_label(label: &str) -> Result<Self, BinningError> {
        let invalid = || BinningError::InvalidMonthLabel(label.to_string());

        let (name, year) = label.trim().split_once(' ').ok_or_else(invalid)?;
        let month = Month::from_str(name).map_err(|_| invalid())?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;

        Self::new(year, month.number_from_month())
    }

    /// Display label, e.g. `Jan 2021`.
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("???", |m| &m.name()[..3]);
        format!("{} {}", name, self.year)
    }

    /// Whether this month lies inside the histogram window.
    pub fn is_plausible(&self) -> bool {
        (Self::EARLIEST..=Self::LATEST).contains(self)
    }

    /// The following calendar month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl FromStr for YearMonth {
    type Err = BinningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BinningError::InvalidYearMonth(s.to_string());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive iterator over calendar months.
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<YearMonth>,
    end: YearMonth,
}

impl Iterator for MonthRange {
    type Item = YearMonth;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|current| *current <= self.end)?;
        self.next = Some(current.succ());
        Some(current)
    }
}

/// Every month from `start` to `end`, both inclusive. Empty if `start > end`.
pub fn months_between(start: YearMonth, end: YearMonth) -> MonthRange {
    MonthRange {
        next: Some(start),
        end,
    }
}
