//! Period-over-period change calculation.

use rust_decimal::Decimal;

use super::types::{Delta, PercentChange};

/// Computes the absolute and percent change from `value_a` to `value_b`.
///
/// - percent = `(b - a) / |a| * 100`
/// - `a == 0 && b == 0` is a defined 0% change
/// - `a == 0 && b != 0` is [`PercentChange::Undefined`]
/// - a ratio too large for `Decimal` is also `Undefined`
/// - a difference too large for `Decimal` saturates and its percent is
///   `Undefined` ([`normalize_rows`] rejects such rows)
///
/// Dividing by `|a|` keeps the sign of the percent equal to the sign of the
/// absolute change when the base is negative.
///
/// [`normalize_rows`]: super::normalizer::normalize_rows
#[must_use]
pub fn compute_delta(value_a: Decimal, value_b: Decimal) -> Delta {
    let Some(absolute) = value_b.checked_sub(value_a) else {
        return Delta {
            absolute: value_b.saturating_sub(value_a),
            percent: PercentChange::Undefined,
        };
    };

    let percent = if value_a.is_zero() {
        if value_b.is_zero() {
            PercentChange::Defined(Decimal::ZERO)
        } else {
            PercentChange::Undefined
        }
    } else {
        absolute
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(value_a.abs()))
            .map_or(PercentChange::Undefined, |percent| {
                PercentChange::Defined(percent.normalize())
            })
    };

    Delta { absolute, percent }
}
