//! Summary statistics over classified records.

use rust_decimal::Decimal;

use super::types::{AccountExtreme, AccountRecord, ClassificationCounts, SummaryStatistics};

/// Aggregates a full record set.
///
/// Absolute-difference statistics cover every record; percent statistics
/// cover only records whose percent change is defined. Statistics with no
/// input, and sums that overflow `Decimal`, are `None`.
#[must_use]
pub fn summarize(records: &[AccountRecord]) -> SummaryStatistics {
    let absolutes: Vec<Decimal> = records.iter().map(|r| r.difference_absolute).collect();
    let percents: Vec<Decimal> = records.iter().filter_map(AccountRecord::percent).collect();

    let mut classification_counts = ClassificationCounts::default();
    for record in records {
        classification_counts.increment(record.classification);
    }

    SummaryStatistics {
        total_accounts: records.len(),
        defined_percent_accounts: percents.len(),
        incomplete_accounts: records.iter().filter(|r| r.incomplete).count(),
        total_period_a: checked_sum(records.iter().map(|r| r.value_period_a)),
        total_period_b: checked_sum(records.iter().map(|r| r.value_period_b)),
        total_difference: checked_sum(absolutes.iter().copied()),
        mean_difference_absolute: mean(&absolutes),
        median_difference_absolute: median(&absolutes),
        mean_difference_percent: mean(&percents),
        median_difference_percent: median(&percents),
        classification_counts,
        positive_variations: absolutes.iter().filter(|d| **d > Decimal::ZERO).count(),
        negative_variations: absolutes.iter().filter(|d| **d < Decimal::ZERO).count(),
        unchanged_variations: absolutes.iter().filter(|d| d.is_zero()).count(),
        max_growth: max_growth(records),
        max_decline: max_decline(records),
    }
}

/// Sum that stops at the first overflow.
#[must_use]
pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Arithmetic mean, `None` for an empty slice or an overflowing sum.
#[must_use]
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let total = checked_sum(values.iter().copied())?;
    total
        .checked_div(Decimal::from(values.len()))
        .map(|mean| mean.normalize())
}

/// Median (mean of the two middle values for even counts), `None` for an
/// empty slice or when the two middle values overflow.
#[must_use]
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    let value = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        sorted[mid - 1]
            .checked_add(sorted[mid])?
            .checked_div(Decimal::TWO)?
    };
    Some(value.normalize())
}

fn max_growth(records: &[AccountRecord]) -> Option<AccountExtreme> {
    records
        .iter()
        .filter_map(|r| r.percent().map(|p| (r, p)))
        .max_by(|(a, pa), (b, pb)| pa.cmp(pb).then_with(|| b.name.cmp(&a.name)))
        .map(|(record, percent)| extreme(record, percent))
}

fn max_decline(records: &[AccountRecord]) -> Option<AccountExtreme> {
    records
        .iter()
        .filter_map(|r| r.percent().map(|p| (r, p)))
        .min_by(|(a, pa), (b, pb)| pa.cmp(pb).then_with(|| a.name.cmp(&b.name)))
        .map(|(record, percent)| extreme(record, percent))
}

fn extreme(record: &AccountRecord, percent: Decimal) -> AccountExtreme {
    AccountExtreme {
        row: record.row,
        name: record.name.clone(),
        percent,
    }
}
