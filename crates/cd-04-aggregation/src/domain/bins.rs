//! Censored bin assembly
//!
//! Pure functions turning raw grouped counts into the bins a caller sees.
//! Every count passes through a [`Censor`] before it is emitted.

use cd_01_binning::{months_between, BinSpec, YearMonth};
use cd_02_censorship::{Censor, LabelOrigin};
use shared_types::{Bin, MISSING_LABEL};
use std::collections::BTreeMap;

/// Raw `(value, count)` groups; `None` collects records without a value.
pub type Groups = Vec<(Option<String>, u64)>;

fn split_missing(groups: &[(Option<String>, u64)]) -> (BTreeMap<&str, u64>, u64) {
    let mut counts = BTreeMap::new();
    let mut missing = 0;
    for (value, count) in groups {
        match value {
            Some(value) => *counts.entry(value.as_str()).or_insert(0) += count,
            None => missing += count,
        }
    }
    (counts, missing)
}

fn push_missing(bins: &mut Vec<Bin>, missing: u64, censor: Censor) {
    let missing = censor.count(missing);
    if missing > 0 {
        bins.push(Bin::new(MISSING_LABEL, missing));
    }
}

fn sort_case_insensitive(labels: &mut [String]) {
    labels.sort_by_cached_key(|label| label.to_lowercase());
}

/// Categorical histogram.
///
/// Declared labels keep their configured order and may be emitted as 0.
/// Derived labels are sorted case-insensitively and dropped when censored.
pub fn categorical_bins(
    groups: &[(Option<String>, u64)],
    enum_values: Option<&[String]>,
    censor: Censor,
) -> Vec<Bin> {
    let (counts, missing) = split_missing(groups);

    let (labels, origin) = match enum_values {
        Some(values) => (values.to_vec(), LabelOrigin::Enumerated),
        None => {
            let mut labels: Vec<String> = counts.keys().map(|k| k.to_string()).collect();
            sort_case_insensitive(&mut labels);
            (labels, LabelOrigin::Derived)
        }
    };

    let mut bins: Vec<Bin> = labels
        .into_iter()
        .filter_map(|label| {
            let observed = counts.get(label.as_str()).copied().unwrap_or(0);
            censor.label(observed, origin).map(|value| Bin::new(label, value))
        })
        .collect();

    push_missing(&mut bins, missing, censor);
    bins
}

/// Numeric histogram over pre-generated bins.
///
/// `counts[i]` is the raw count in `specs[i]`. Records outside every bin (or
/// without a value) form the missing bucket.
pub fn range_bins(specs: &[BinSpec], counts: &[u64], total: u64, censor: Censor) -> Vec<Bin> {
    let mut bins: Vec<Bin> = specs
        .iter()
        .zip(counts)
        .map(|(spec, &count)| Bin::new(spec.label.clone(), censor.count(count)))
        .collect();

    let binned: u64 = counts.iter().sum();
    push_missing(&mut bins, total.saturating_sub(binned), censor);
    bins
}

/// Monthly histogram from counts grouped by `yyyy-mm` prefix.
///
/// Every month between the first and last observed month gets a bin. The
/// observed range comes from raw counts; only the emitted values are
/// censored. Keys that are not `yyyy-mm`, or fall outside the histogram
/// window, count as missing.
pub fn monthly_bins(groups: &[(Option<String>, u64)], censor: Censor) -> Vec<Bin> {
    let (keys, mut missing) = split_missing(groups);

    let mut counts: BTreeMap<YearMonth, u64> = BTreeMap::new();
    for (key, count) in keys {
        match key.parse::<YearMonth>() {
            Ok(month) if month.is_plausible() => *counts.entry(month).or_insert(0) += count,
            _ => missing += count,
        }
    }

    let mut bins = Vec::new();
    if let (Some((&start, _)), Some((&end, _))) = (counts.first_key_value(), counts.last_key_value()) {
        bins.extend(months_between(start, end).map(|month| {
            let observed = counts.get(&month).copied().unwrap_or(0);
            Bin::new(month.label(), censor.count(observed))
        }));
    }

    push_missing(&mut bins, missing, censor);
    bins
}

/// Observed values that may be offered as search options.
///
/// A value is offered only if its count survives censorship.
pub fn derived_options(groups: &[(Option<String>, u64)], censor: Censor) -> Vec<String> {
    let (counts, _) = split_missing(groups);
    let mut options: Vec<String> = counts
        .into_iter()
        .filter(|&(_, count)| censor.count(count) > 0)
        .map(|(value, _)| value.to_string())
        .collect();
    sort_case_insensitive(&mut options);
    options
}

/// Month labels between two observed months, clamped to the histogram window.
pub fn month_options(start: YearMonth, end: YearMonth) -> Vec<String> {
    months_between(start.max(YearMonth::EARLIEST), end.min(YearMonth::LATEST))
        .map(|m| m.label())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn groups(entries: &[(Option<&str>, u64)]) -> Groups {
        entries
            .iter()
            .map(|(value, count)| (value.map(str::to_string), *count))
            .collect()
    }

    fn labels(bins: &[Bin]) -> Vec<&str> {
        bins.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn test_derived_labels_small_cells_are_dropped() {
        let observed = groups(&[(Some("A"), 3), (Some("B"), 10), (Some("C"), 5)]);
        let bins = categorical_bins(&observed, None, Censor::with_threshold(5));

        assert_eq!(bins, vec![Bin::new("B", 10)]);
    }

    #[test]
    fn test_enumerated_labels_keep_censored_zero() {
        let observed = groups(&[(Some("A"), 3), (Some("B"), 10), (Some("C"), 5)]);
        let declared = vec!["C".to_string(), "B".to_string(), "A".to_string(), "D".to_string()];
        let bins = categorical_bins(&observed, Some(&declared), Censor::with_threshold(5));

        assert_eq!(
            bins,
            vec![Bin::new("C", 0), Bin::new("B", 10), Bin::new("A", 0), Bin::new("D", 0)]
        );
    }

    #[test]
    fn test_derived_labels_sorted_case_insensitively_with_missing_last() {
        let observed = groups(&[(Some("beta"), 8), (None, 9), (Some("Alpha"), 7), (Some("Gamma"), 6)]);
        let bins = categorical_bins(&observed, None, Censor::uncensored());

        assert_eq!(labels(&bins), vec!["Alpha", "beta", "Gamma", MISSING_LABEL]);
    }

    #[test]
    fn test_missing_bucket_is_censored() {
        let observed = groups(&[(Some("A"), 10), (None, 2)]);
        let bins = categorical_bins(&observed, None, Censor::with_threshold(5));

        assert_eq!(bins, vec![Bin::new("A", 10)]);
    }

    #[test]
    fn test_range_bins_with_missing() {
        let specs = vec![
            BinSpec {
                floor: None,
                ceil: Some(10),
                label: "< 10".into(),
            },
            BinSpec {
                floor: Some(10),
                ceil: None,
                label: "≥ 10".into(),
            },
        ];
        let bins = range_bins(&specs, &[12, 3], 25, Censor::with_threshold(5));

        assert_eq!(
            bins,
            vec![Bin::new("< 10", 12), Bin::new("≥ 10", 0), Bin::new(MISSING_LABEL, 10)]
        );
    }

    #[test]
    fn test_monthly_gap_fill() {
        let observed = groups(&[(Some("2021-01"), 3), (Some("2021-04"), 9)]);
        let bins = monthly_bins(&observed, Censor::with_threshold(5));

        assert_eq!(
            bins,
            vec![
                Bin::new("Jan 2021", 0),
                Bin::new("Feb 2021", 0),
                Bin::new("Mar 2021", 0),
                Bin::new("Apr 2021", 9),
            ]
        );
    }

    #[test]
    fn test_monthly_without_data_is_missing_only() {
        let observed = groups(&[(None, 12), (Some("garbage"), 1)]);
        let bins = monthly_bins(&observed, Censor::with_threshold(5));

        assert_eq!(bins, vec![Bin::new(MISSING_LABEL, 13)]);
        assert!(monthly_bins(&[], Censor::uncensored()).is_empty());
    }

    #[test]
    fn test_monthly_outlying_dates_count_as_missing() {
        let observed = groups(&[
            (Some("0001-01"), 7),
            (Some("2021-02"), 8),
            (Some("2021-03"), 9),
            (Some("9999-12"), 4),
        ]);
        let bins = monthly_bins(&observed, Censor::with_threshold(5));

        assert_eq!(
            bins,
            vec![
                Bin::new("Feb 2021", 8),
                Bin::new("Mar 2021", 9),
                Bin::new(MISSING_LABEL, 11),
            ]
        );
    }

    #[test]
    fn test_derived_options_hide_small_cells() {
        let observed = groups(&[(Some("UNKNOWN_SEX"), 3), (Some("MALE"), 40), (Some("female"), 35), (None, 7)]);

        assert_eq!(
            derived_options(&observed, Censor::with_threshold(5)),
            vec!["female", "MALE"]
        );
        assert_eq!(
            derived_options(&observed, Censor::uncensored()),
            vec!["female", "MALE", "UNKNOWN_SEX"]
        );
    }

    #[test]
    fn test_month_options() {
        let start: YearMonth = "2021-11".parse().unwrap();
        let end: YearMonth = "2022-01".parse().unwrap();
        assert_eq!(month_options(start, end), vec!["Nov 2021", "Dec 2021", "Jan 2022"]);
    }

    #[test]
    fn test_month_options_clamped_to_window() {
        let start: YearMonth = "0001-01".parse().unwrap();
        let end: YearMonth = "1900-02".parse().unwrap();
        assert_eq!(month_options(start, end), vec!["Jan 1900", "Feb 1900"]);

        let start: YearMonth = "2100-11".parse().unwrap();
        let end: YearMonth = "9999-12".parse().unwrap();
        assert_eq!(month_options(start, end), vec!["Nov 2100", "Dec 2100"]);
    }

    proptest! {
        #[test]
        fn prop_no_bin_falls_in_the_masked_band(
            threshold in 0u64..20,
            counts in proptest::collection::btree_map("[a-e]{1,3}", 0u64..40, 0..8),
            missing in 0u64..40,
        ) {
            let censor = Censor::with_threshold(threshold);
            let mut observed: Groups = counts.into_iter().map(|(k, v)| (Some(k), v)).collect();
            observed.push((None, missing));

            for bin in categorical_bins(&observed, None, censor) {
                prop_assert!(bin.value > threshold, "derived bin {:?} at threshold {}", bin, threshold);
            }
            for bin in monthly_bins(&observed, censor) {
                prop_assert!(bin.value == 0 || bin.value > threshold);
            }
        }
    }
}
