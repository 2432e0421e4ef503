//! Variation classification.

use rust_decimal::Decimal;

use super::types::{Classification, PercentChange, Thresholds};

/// Maps a percent change to its bucket.
///
/// Intervals are half-open and inclusive toward `Stable`:
///
/// | percent              | bucket            |
/// |----------------------|-------------------|
/// | `> high_growth`      | `HighGrowth`      |
/// | `> moderate_growth`  | `ModerateGrowth`  |
/// | `>= moderate_decline`| `Stable`          |
/// | `>= high_decline`    | `ModerateDecline` |
/// | otherwise            | `HighDecline`     |
///
/// An undefined percent is always `Undefined`.
#[must_use]
pub fn classify(percent: PercentChange, thresholds: &Thresholds) -> Classification {
    match percent {
        PercentChange::Defined(value) => classify_percent(value, thresholds),
        PercentChange::Undefined => Classification::Undefined,
    }
}

/// Maps a defined percent change to one of the five buckets.
#[must_use]
pub fn classify_percent(value: Decimal, thresholds: &Thresholds) -> Classification {
    if value > thresholds.high_growth {
        Classification::HighGrowth
    } else if value > thresholds.moderate_growth {
        Classification::ModerateGrowth
    } else if value >= thresholds.moderate_decline {
        Classification::Stable
    } else if value >= thresholds.high_decline {
        Classification::ModerateDecline
    } else {
        Classification::HighDecline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(150), Classification::HighGrowth)]
    #[case(dec!(20.0000001), Classification::HighGrowth)]
    #[case(dec!(20), Classification::ModerateGrowth)]
    #[case(dec!(20.0), Classification::ModerateGrowth)]
    #[case(dec!(5.0000001), Classification::ModerateGrowth)]
    #[case(dec!(5), Classification::Stable)]
    #[case(dec!(0), Classification::Stable)]
    #[case(dec!(-5), Classification::Stable)]
    #[case(dec!(-5.0000001), Classification::ModerateDecline)]
    #[case(dec!(-20), Classification::ModerateDecline)]
    #[case(dec!(-20.0000001), Classification::HighDecline)]
    #[case(dec!(-100), Classification::HighDecline)]
    fn test_default_boundaries(#[case] percent: Decimal, #[case] expected: Classification) {
        let thresholds = Thresholds::default();
        assert_eq!(classify(PercentChange::Defined(percent), &thresholds), expected);
    }

    #[test]
    fn test_undefined_percent() {
        assert_eq!(
            classify(PercentChange::Undefined, &Thresholds::default()),
            Classification::Undefined
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds {
            high_growth: dec!(50),
            moderate_growth: dec!(10),
            moderate_decline: dec!(-10),
            high_decline: dec!(-50),
        };

        assert_eq!(classify_percent(dec!(30), &thresholds), Classification::ModerateGrowth);
        assert_eq!(classify_percent(dec!(10), &thresholds), Classification::Stable);
        assert_eq!(classify_percent(dec!(-30), &thresholds), Classification::ModerateDecline);
        assert_eq!(classify_percent(dec!(-50.5), &thresholds), Classification::HighDecline);
    }
}
