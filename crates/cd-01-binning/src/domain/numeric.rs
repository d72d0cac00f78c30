//! Numeric bin generation
//!
//! Two strategies:
//!
//! - **Auto**: an optional open `< taper_left` bin, uniform `bin_size` bins
//!   across `[taper_left, taper_right)`, and an optional `≥ taper_right` bin.
//! - **Custom**: explicit boundaries, with open head/tail bins unless the
//!   configured minimum/maximum coincides with the adjacent boundary.
//!
//! Integers only. Both strategies validate their whole configuration before
//! producing a single bin.

use serde::{Deserialize, Serialize};

use crate::error::BinningError;

/// A `(floor, ceil, label)` triple covering `[floor, ceil)`.
///
/// `None` on either side means the range is unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinSpec {
    pub floor: Option<i64>,
    pub ceil: Option<i64>,
    pub label: String,
}

impl BinSpec {
    fn new(floor: Option<i64>, ceil: Option<i64>, label: String) -> Self {
        Self { floor, ceil, label }
    }

    /// Whether `value` falls in `[floor, ceil)`.
    pub fn contains(&self, value: f64) -> bool {
        let above_floor = self.floor.map_or(true, |floor| value >= floor as f64);
        let below_ceil = self.ceil.map_or(true, |ceil| value < ceil as f64);
        above_floor && below_ceil
    }
}

/// Uniform-width binning between two taper points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBinning {
    pub minimum: i64,
    pub maximum: i64,
    pub taper_left: i64,
    pub taper_right: i64,
    pub bin_size: i64,
}

impl AutoBinning {
    /// Check the configuration per INVARIANT-3.
    pub fn validate(&self) -> Result<(), BinningError> {
        if self.maximum < self.minimum {
            return Err(BinningError::MinimumAboveMaximum {
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }

        if self.taper_right < self.taper_left
            || self.minimum > self.taper_left
            || self.taper_right > self.maximum
        {
            return Err(BinningError::TaperOutOfRange {
                minimum: self.minimum,
                maximum: self.maximum,
                taper_left: self.taper_left,
                taper_right: self.taper_right,
            });
        }

        if self.bin_size <= 0 {
            return Err(BinningError::NonPositiveBinSize(self.bin_size));
        }

        let span = self.taper_right - self.taper_left;
        if span % self.bin_size != 0 {
            return Err(BinningError::SpanNotMultipleOfBinSize {
                span,
                bin_size: self.bin_size,
            });
        }

        Ok(())
    }

    pub fn bins(&self) -> Result<Vec<BinSpec>, BinningError> {
        self.validate()?;

        let uniform = ((self.taper_right - self.taper_left) / self.bin_size) as usize;
        let mut bins = Vec::with_capacity(uniform + 2);

        if self.minimum != self.taper_left {
            bins.push(BinSpec::new(
                Some(self.minimum),
                Some(self.taper_left),
                format!("< {}", self.taper_left),
            ));
        }

        let mut floor = self.taper_left;
        while floor < self.taper_right {
            let ceil = floor + self.bin_size;
            bins.push(BinSpec::new(Some(floor), Some(ceil), closed_label(floor, ceil)));
            floor = ceil;
        }

        if self.maximum != self.taper_right {
            bins.push(BinSpec::new(
                Some(self.taper_right),
                Some(self.maximum),
                format!("≥ {}", self.taper_right),
            ));
        }

        Ok(bins)
    }
}

/// Explicit boundary binning with optional bounds.
///
/// An absent `minimum` (or `maximum`) makes the head (or tail) bin
/// open-ended. A bound equal to the adjacent boundary drops that bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBinning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    pub bins: Vec<i64>,
}

impl CustomBinning {
    /// Check the configuration per INVARIANT-3.
    pub fn validate(&self) -> Result<(), BinningError> {
        if let (Some(minimum), Some(maximum)) = (self.minimum, self.maximum) {
            if maximum < minimum {
                return Err(BinningError::MinimumAboveMaximum { minimum, maximum });
            }
        }

        let (first, last) = match (self.bins.first(), self.bins.last()) {
            (Some(&first), Some(&last)) if self.bins.len() >= 2 => (first, last),
            _ => return Err(BinningError::TooFewBoundaries(self.bins.len())),
        };

        if let Some(minimum) = self.minimum {
            if minimum > first {
                return Err(BinningError::MinimumAboveFirstBoundary { minimum, first });
            }
        }

        if let Some(maximum) = self.maximum {
            if maximum < last {
                return Err(BinningError::MaximumBelowLastBoundary { maximum, last });
            }
        }

        if let Some(pair) = self.bins.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(BinningError::UnorderedBoundaries {
                previous: pair[0],
                next: pair[1],
            });
        }

        Ok(())
    }

    pub fn bins(&self) -> Result<Vec<BinSpec>, BinningError> {
        self.validate()?;

        let first = self.bins[0];
        let last = self.bins[self.bins.len() - 1];
        let mut bins = Vec::with_capacity(self.bins.len() + 1);

        if self.minimum != Some(first) {
            bins.push(BinSpec::new(self.minimum, Some(first), format!("< {}", first)));
        }

        for pair in self.bins.windows(2) {
            bins.push(BinSpec::new(
                Some(pair[0]),
                Some(pair[1]),
                closed_label(pair[0], pair[1]),
            ));
        }

        if self.maximum != Some(last) {
            bins.push(BinSpec::new(Some(last), self.maximum, format!("≥ {}", last)));
        }

        Ok(bins)
    }
}

/// Binning strategy of a number field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericBinning {
    Custom(CustomBinning),
    Auto(AutoBinning),
}

impl NumericBinning {
    pub fn validate(&self) -> Result<(), BinningError> {
        match self {
            Self::Custom(custom) => custom.validate(),
            Self::Auto(auto) => auto.validate(),
        }
    }

    /// Labelled ranges for this field, in ascending order.
    pub fn bins(&self) -> Result<Vec<BinSpec>, BinningError> {
        match self {
            Self::Custom(custom) => custom.bins(),
            Self::Auto(auto) => auto.bins(),
        }
    }
}

fn closed_label(floor: i64, ceil: i64) -> String {
    format!("[{}, {})", floor, ceil)
}
