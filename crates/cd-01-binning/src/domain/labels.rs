//! Bin label parsing
//!
//! Search filters name numeric bins by their display label. This turns a
//! label back into the half-open range it stands for.

use crate::error::BinningError;

/// Parse `"[a, b)"`, `"< a"` or `"≥ a"` into `(floor, ceil)`.
pub fn parse_range_label(label: &str) -> Result<(Option<i64>, Option<i64>), BinningError> {
    let invalid = || BinningError::InvalidRangeLabel(label.to_string());
    let trimmed = label.trim();

    if let Some(inner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(')')) {
        let (floor, ceil) = inner.split_once(',').ok_or_else(invalid)?;
        let floor: i64 = floor.trim().parse().map_err(|_| invalid())?;
        let ceil: i64 = ceil.trim().parse().map_err(|_| invalid())?;
        if floor >= ceil {
            return Err(invalid());
        }
        return Ok((Some(floor), Some(ceil)));
    }

    let (symbol, value) = trimmed.split_once(' ').ok_or_else(invalid)?;
    let value: i64 = value.trim().parse().map_err(|_| invalid())?;
    match symbol {
        "<" => Ok((None, Some(value))),
        "≥" => Ok((Some(value), None)),
        _ => Err(invalid()),
    }
}
