//! Search filter conditions
//!
//! A public search filter is a `(field, value)` pair where `value` is one of
//! the options the field advertises: a declared or observed category, a bin
//! label, or a month label. Each is turned into a predicate on the field's
//! search path.

use cd_01_binning::{parse_range_label, YearMonth};
use cd_03_field_registry::{FieldDescriptor, FieldKind, FieldPath};

use crate::error::InvalidFilterValue;

/// Test applied to the values found at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive string equality.
    EqualsIgnoreCase(String),
    /// Numeric value in `[floor, ceil)`; `None` is unbounded.
    InRange { floor: Option<i64>, ceil: Option<i64> },
    /// String value starting with the prefix (`yyyy-mm` for months).
    StartsWith(String),
}

/// A predicate bound to a storage path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub path: FieldPath,
    pub predicate: Predicate,
}

impl Condition {
    /// Build the condition a filter value stands for on `field`.
    pub fn for_field(field: &FieldDescriptor, value: &str) -> Result<Self, InvalidFilterValue> {
        let invalid = |reason: &str| InvalidFilterValue {
            field: field.id.clone(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let predicate = match &field.kind {
            FieldKind::String { enum_values } => {
                if let Some(options) = enum_values {
                    if !options.iter().any(|o| o.eq_ignore_ascii_case(value)) {
                        return Err(invalid("not one of the field's options"));
                    }
                }
                Predicate::EqualsIgnoreCase(value.to_string())
            }
            FieldKind::Number { bins, .. } => {
                // Only the field's own bins may be queried, never an arbitrary range.
                let bin = bins.iter().find(|b| b.label == value.trim());
                match bin {
                    Some(bin) => Predicate::InRange {
                        floor: bin.floor,
                        ceil: bin.ceil,
                    },
                    None if parse_range_label(value).is_ok() => {
                        return Err(invalid("not one of the field's bins"))
                    }
                    None => return Err(invalid("expected a bin label such as `[a, b)`, `< a` or `≥ a`")),
                }
            }
            FieldKind::Date { .. } => {
                let month = YearMonth::from_label(value)
                    .map_err(|_| invalid("expected a month such as `Jan 2021`"))?;
                Predicate::StartsWith(month.to_string())
            }
        };

        Ok(Self {
            path: field.search_path.clone(),
            predicate,
        })
    }
}
