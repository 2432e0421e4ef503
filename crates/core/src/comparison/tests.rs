//! Property-based tests for the comparison module.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::classifier::classify_percent;
use super::delta::compute_delta;
use super::error::ValidationReason;
use super::service::ComparisonService;
use super::types::{AnalysisOptions, Classification, PercentChange, RawRow, Thresholds};

fn amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (-50_000_000i64..50_000_000).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

fn percent() -> impl Strategy<Value = Decimal> {
    (-100_000i64..100_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn rows() -> impl Strategy<Value = Vec<RawRow>> {
    prop::collection::vec((amount(), amount()), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| RawRow::new(format!("Account {i}"), Some(a), Some(b)))
            .collect()
    })
}

proptest! {
    /// Property: absolute change is exactly `b - a` and the percent change
    /// carries the same sign as the absolute change whenever it is defined.
    #[test]
    fn test_delta_sign_matches_absolute(a in amount(), b in amount()) {
        let delta = compute_delta(a, b);
        prop_assert_eq!(delta.absolute, b - a);

        if let PercentChange::Defined(percent) = delta.percent {
            prop_assert_eq!(percent.is_zero(), delta.absolute.is_zero());
            if !percent.is_zero() {
                prop_assert_eq!(percent.is_sign_positive(), delta.absolute.is_sign_positive());
            }
        }
    }

    /// Property: a zero base is undefined unless the new value is also zero.
    #[test]
    fn test_zero_base(b in amount()) {
        let delta = compute_delta(Decimal::ZERO, b);
        prop_assert_eq!(delta.percent.is_defined(), b.is_zero());
    }

    /// Property: a nonzero base always yields a defined percent change.
    #[test]
    fn test_nonzero_base_is_defined(a in amount(), b in amount()) {
        prop_assume!(!a.is_zero());
        prop_assert!(compute_delta(a, b).percent.is_defined());
    }

    /// Property: every defined percent lands in exactly one of the five buckets.
    #[test]
    fn test_classification_is_total(p in percent()) {
        let classification = classify_percent(p, &Thresholds::default());
        prop_assert_ne!(classification, Classification::Undefined);
    }

    /// Property: a larger percent never lands in a lower bucket.
    #[test]
    fn test_classification_is_monotonic(p1 in percent(), p2 in percent()) {
        let thresholds = Thresholds::default();
        let (low, high) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };

        // Buckets are declared from highest growth to highest decline.
        prop_assert!(classify_percent(high, &thresholds) <= classify_percent(low, &thresholds));
    }

    /// Property: rankings are sorted, bounded, disjoint and never contain an
    /// undefined percent.
    #[test]
    fn test_rankings(rows in rows(), top_n in 0usize..15) {
        let options = AnalysisOptions { top_n, ..AnalysisOptions::default() };
        let dataset = ComparisonService::analyze(&rows, &options).unwrap().dataset;

        prop_assert!(dataset.top_growth.len() <= top_n);
        prop_assert!(dataset.top_decline.len() <= top_n);
        prop_assert!(dataset.largest_accounts.len() <= top_n);

        let growth: Vec<Decimal> = dataset.top_growth.records.iter().filter_map(|r| r.percent()).collect();
        let decline: Vec<Decimal> = dataset.top_decline.records.iter().filter_map(|r| r.percent()).collect();

        prop_assert_eq!(growth.len(), dataset.top_growth.len());
        prop_assert_eq!(decline.len(), dataset.top_decline.len());
        prop_assert!(growth.iter().all(|p| *p > Decimal::ZERO));
        prop_assert!(decline.iter().all(|p| *p < Decimal::ZERO));
        prop_assert!(growth.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(decline.windows(2).all(|w| w[0] <= w[1]));

        let largest = &dataset.largest_accounts.records;
        prop_assert!(largest.windows(2).all(|w| w[0].value_period_b >= w[1].value_period_b));

        for record in &dataset.top_growth.records {
            prop_assert!(!dataset.top_decline.names().contains(&record.name.as_str()));
        }
    }

    /// Property: classification counts add up to the number of records and
    /// totals match the record values.
    #[test]
    fn test_summary_consistency(rows in rows()) {
        let dataset = ComparisonService::analyze(&rows, &AnalysisOptions::default()).unwrap().dataset;
        let summary = &dataset.summary;
        let counts = summary.classification_counts;

        prop_assert_eq!(summary.total_accounts, dataset.records.len());
        prop_assert_eq!(counts.classified_total() + counts.undefined, summary.total_accounts);
        prop_assert_eq!(counts.classified_total(), summary.defined_percent_accounts);
        prop_assert_eq!(
            summary.positive_variations + summary.negative_variations + summary.unchanged_variations,
            summary.total_accounts
        );
        prop_assert_eq!(
            summary.total_difference,
            summary.total_period_b.zip(summary.total_period_a).map(|(b, a)| b - a)
        );

        let total_a: Decimal = dataset.records.iter().map(|r| r.value_period_a).sum();
        prop_assert_eq!(summary.total_period_a, Some(total_a));
    }

    /// Property: the same input always produces the same dataset, and the
    /// input rows are left untouched.
    #[test]
    fn test_analysis_is_deterministic(rows in rows()) {
        let before = rows.clone();
        let options = AnalysisOptions::default();

        let first = ComparisonService::analyze(&rows, &options).unwrap();
        let second = ComparisonService::analyze(&rows, &options).unwrap();

        prop_assert_eq!(&rows, &before);
        prop_assert_eq!(first, second);
    }

    /// Property: values anywhere in the `Decimal` range never abort an
    /// analysis; the run either succeeds or reports an out-of-range row.
    #[test]
    fn test_extreme_values_never_panic(
        values in prop::collection::vec(
            (
                prop_oneof![Just(Decimal::MIN), Just(Decimal::MAX), amount()],
                prop_oneof![Just(Decimal::MIN), Just(Decimal::MAX), amount()],
            ),
            0..6,
        ),
    ) {
        let rows: Vec<RawRow> = values
            .into_iter()
            .enumerate()
            .map(|(i, (a, b))| RawRow::new(format!("Account {i}"), Some(a), Some(b)))
            .collect();

        match ComparisonService::analyze(&rows, &AnalysisOptions::default()) {
            Ok(report) => prop_assert_eq!(report.dataset.records.len(), rows.len()),
            Err(err) => prop_assert_eq!(err.reason, ValidationReason::OutOfRange),
        }
    }

    /// Property: record order follows input order.
    #[test]
    fn test_record_order_is_preserved(rows in rows()) {
        let dataset = ComparisonService::analyze(&rows, &AnalysisOptions::default()).unwrap().dataset;
        let rows_seen: Vec<usize> = dataset.records.iter().map(|r| r.row).collect();
        let expected: Vec<usize> = (0..rows.len()).collect();
        prop_assert_eq!(rows_seen, expected);
    }
}
