//! Ranked subsets of classified records.
//!
//! Every ranking is a stable sort with the account name as tie-break, so the
//! same input always ranks the same way.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::types::{AccountRecord, IncompletePolicy, RankedSubset, RankingKind};

/// Accounts with the largest positive percent change, highest first.
///
/// Records with an undefined or non-positive percent are never included.
#[must_use]
pub fn top_growth(records: &[AccountRecord], limit: usize, policy: IncompletePolicy) -> RankedSubset {
    let mut candidates: Vec<&AccountRecord> = records
        .iter()
        .filter(|r| r.percent().is_some_and(|p| p > Decimal::ZERO))
        .filter(|r| eligible(r, policy))
        .collect();

    candidates.sort_by(|a, b| b.percent().cmp(&a.percent()).then_with(|| by_name(a, b)));
    subset(RankingKind::TopGrowth, limit, &candidates)
}

/// Accounts with the largest negative percent change, lowest first.
///
/// Records with an undefined or non-negative percent are never included.
#[must_use]
pub fn top_decline(records: &[AccountRecord], limit: usize, policy: IncompletePolicy) -> RankedSubset {
    let mut candidates: Vec<&AccountRecord> = records
        .iter()
        .filter(|r| r.percent().is_some_and(|p| p < Decimal::ZERO))
        .filter(|r| eligible(r, policy))
        .collect();

    candidates.sort_by(|a, b| a.percent().cmp(&b.percent()).then_with(|| by_name(a, b)));
    subset(RankingKind::TopDecline, limit, &candidates)
}

/// Accounts with the largest second-period value, highest first.
#[must_use]
pub fn largest_accounts(records: &[AccountRecord], limit: usize) -> RankedSubset {
    let mut candidates: Vec<&AccountRecord> = records.iter().collect();
    candidates.sort_by(|a, b| {
        b.value_period_b
            .cmp(&a.value_period_b)
            .then_with(|| by_name(a, b))
    });
    subset(RankingKind::LargestAccounts, limit, &candidates)
}

fn eligible(record: &AccountRecord, policy: IncompletePolicy) -> bool {
    match policy {
        IncompletePolicy::Include => true,
        IncompletePolicy::ExcludeFromRankings => !record.incomplete,
    }
}

fn by_name(a: &AccountRecord, b: &AccountRecord) -> Ordering {
    a.name.cmp(&b.name)
}

fn subset(kind: RankingKind, limit: usize, sorted: &[&AccountRecord]) -> RankedSubset {
    RankedSubset {
        kind,
        limit,
        records: sorted.iter().take(limit).map(|r| (*r).clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::types::{Classification, PercentChange};
    use rust_decimal_macros::dec;

    fn record(name: &str, percent: Option<Decimal>, value_b: Decimal) -> AccountRecord {
        AccountRecord {
            row: 0,
            name: name.to_string(),
            value_period_a: dec!(100),
            value_period_b: value_b,
            percent_period_a: None,
            percent_period_b: None,
            incomplete: false,
            difference_absolute: value_b - dec!(100),
            difference_percent: percent.map_or(PercentChange::Undefined, PercentChange::Defined),
            classification: Classification::Stable,
        }
    }

    #[test]
    fn test_top_growth_orders_descending_and_excludes_non_growth() {
        let records = vec![
            record("A", Some(dec!(10)), dec!(110)),
            record("B", Some(dec!(-10)), dec!(90)),
            record("C", None, dec!(50)),
            record("D", Some(dec!(40)), dec!(140)),
            record("E", Some(dec!(0)), dec!(100)),
        ];
        let growth = top_growth(&records, 10, IncompletePolicy::Include);

        assert_eq!(growth.kind, RankingKind::TopGrowth);
        assert_eq!(growth.limit, 10);
        assert_eq!(growth.names(), vec!["D", "A"]);
    }

    #[test]
    fn test_top_decline_orders_ascending() {
        let records = vec![
            record("A", Some(dec!(-5)), dec!(95)),
            record("B", Some(dec!(-50)), dec!(50)),
            record("C", None, dec!(50)),
            record("D", Some(dec!(12)), dec!(112)),
        ];
        let decline = top_decline(&records, 10, IncompletePolicy::Include);
        assert_eq!(decline.names(), vec!["B", "A"]);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let records = vec![
            record("Zeta", Some(dec!(25)), dec!(125)),
            record("Alpha", Some(dec!(25)), dec!(125)),
            record("Mid", Some(dec!(25.0)), dec!(125)),
        ];
        let growth = top_growth(&records, 3, IncompletePolicy::Include);
        assert_eq!(growth.names(), vec!["Alpha", "Mid", "Zeta"]);

        let largest = largest_accounts(&records, 3);
        assert_eq!(largest.names(), vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn test_limit_truncates() {
        let records: Vec<_> = (1..=8)
            .map(|i| record(&format!("Acct {i}"), Some(Decimal::from(i)), dec!(100)))
            .collect();
        let growth = top_growth(&records, 3, IncompletePolicy::Include);

        assert_eq!(growth.len(), 3);
        assert_eq!(growth.names(), vec!["Acct 8", "Acct 7", "Acct 6"]);
        assert!(top_growth(&records, 0, IncompletePolicy::Include).is_empty());
    }

    #[test]
    fn test_incomplete_policy() {
        let mut partial = record("Partial", Some(dec!(80)), dec!(180));
        partial.incomplete = true;
        let records = vec![partial, record("Full", Some(dec!(30)), dec!(130))];

        let included = top_growth(&records, 5, IncompletePolicy::Include);
        assert_eq!(included.names(), vec!["Partial", "Full"]);

        let excluded = top_growth(&records, 5, IncompletePolicy::ExcludeFromRankings);
        assert_eq!(excluded.names(), vec!["Full"]);
    }

    #[test]
    fn test_largest_accounts_include_undefined_percent() {
        let records = vec![
            record("Small", Some(dec!(1)), dec!(10)),
            record("New", None, dec!(5000)),
            record("Mid", Some(dec!(-3)), dec!(700)),
        ];
        let largest = largest_accounts(&records, 2);
        assert_eq!(largest.names(), vec!["New", "Mid"]);
    }

    #[test]
    fn test_empty_records() {
        assert!(top_growth(&[], 5, IncompletePolicy::Include).is_empty());
        assert!(top_decline(&[], 5, IncompletePolicy::Include).is_empty());
        assert!(largest_accounts(&[], 5).is_empty());
    }
}
