//! Comparison data types.

use std::fmt;

use comparo_shared::{AppConfig, NumberFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{RowField, ValidationError};

// ============================================================================
// Input
// ============================================================================

/// A raw cell as handed over by the spreadsheet reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    /// Text that still needs cleaning (e.g. `"R$ 1.234,56"`).
    Text(String),
    /// Already numeric cell.
    Number(Decimal),
}

impl From<Decimal> for RawCell {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// One unvalidated input row: account name, value and percent for each period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRow {
    /// Account name.
    pub name: Option<String>,
    /// Value in the first period.
    pub value_a: Option<RawCell>,
    /// Informational percentage in the first period.
    pub percent_a: Option<RawCell>,
    /// Value in the second period.
    pub value_b: Option<RawCell>,
    /// Informational percentage in the second period.
    pub percent_b: Option<RawCell>,
}

impl RawRow {
    /// Creates a row with both period values and no percentages.
    pub fn new(name: impl Into<String>, value_a: Option<Decimal>, value_b: Option<Decimal>) -> Self {
        Self {
            name: Some(name.into()),
            value_a: value_a.map(RawCell::Number),
            percent_a: None,
            value_b: value_b.map(RawCell::Number),
            percent_b: None,
        }
    }

    /// Returns true if the row carries no name and no cells at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let blank_cell = |cell: &Option<RawCell>| match cell {
            None => true,
            Some(RawCell::Text(text)) => text.trim().is_empty(),
            Some(RawCell::Number(_)) => false,
        };

        self.name.as_deref().is_none_or(|name| name.trim().is_empty())
            && blank_cell(&self.value_a)
            && blank_cell(&self.percent_a)
            && blank_cell(&self.value_b)
            && blank_cell(&self.percent_b)
    }
}

// ============================================================================
// Options
// ============================================================================

/// Percent-change boundaries between classification buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Above this, growth is high.
    pub high_growth: Decimal,
    /// Above this (up to `high_growth` inclusive), growth is moderate.
    pub moderate_growth: Decimal,
    /// At or above this (up to `moderate_growth` inclusive), the account is stable.
    pub moderate_decline: Decimal,
    /// At or above this (below `moderate_decline`), decline is moderate.
    pub high_decline: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            high_growth: Decimal::from(20),
            moderate_growth: Decimal::from(5),
            moderate_decline: Decimal::from(-5),
            high_decline: Decimal::from(-20),
        }
    }
}

/// How rows with a substituted (missing) value take part in rankings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncompletePolicy {
    /// Incomplete rows are ranked like any other.
    #[default]
    Include,
    /// Incomplete rows stay in the table and statistics but not in growth/decline rankings.
    ExcludeFromRankings,
}

/// What to do with an invalid row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMode {
    /// Fail on the first invalid row.
    #[default]
    Strict,
    /// Drop invalid rows and report them as warnings.
    SkipInvalid,
}

/// Parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Classification boundaries.
    pub thresholds: Thresholds,
    /// Size of each ranked subset.
    pub top_n: usize,
    /// Ranking treatment of incomplete rows.
    pub incomplete_policy: IncompletePolicy,
    /// Treatment of invalid rows.
    pub error_mode: ErrorMode,
    /// How text cells are parsed.
    pub number_format: NumberFormat,
    /// Drop rows with no name and no values (with a `BlankRow` warning)
    /// instead of rejecting them for their empty name. Applies in both
    /// error modes.
    pub skip_blank_rows: bool,
    /// Drop rows whose two values are both zero.
    pub skip_zero_rows: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            top_n: 10,
            incomplete_policy: IncompletePolicy::Include,
            error_mode: ErrorMode::Strict,
            number_format: NumberFormat::default(),
            skip_blank_rows: true,
            skip_zero_rows: false,
        }
    }
}

impl From<&AppConfig> for AnalysisOptions {
    fn from(config: &AppConfig) -> Self {
        let settings = &config.analysis;
        Self {
            thresholds: Thresholds {
                high_growth: settings.high_growth,
                moderate_growth: settings.moderate_growth,
                moderate_decline: settings.moderate_decline,
                high_decline: settings.high_decline,
            },
            top_n: settings.top_n,
            incomplete_policy: if settings.exclude_incomplete_from_rankings {
                IncompletePolicy::ExcludeFromRankings
            } else {
                IncompletePolicy::Include
            },
            error_mode: if settings.strict {
                ErrorMode::Strict
            } else {
                ErrorMode::SkipInvalid
            },
            number_format: config.number_format.clone(),
            skip_blank_rows: settings.skip_blank_rows,
            skip_zero_rows: settings.skip_zero_rows,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// A validated account before any derived field is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAccount {
    /// Zero-based index of the source row.
    pub row: usize,
    /// Trimmed account name.
    pub name: String,
    /// Value in the first period (0 when missing).
    pub value_period_a: Decimal,
    /// Value in the second period (0 when missing).
    pub value_period_b: Decimal,
    /// Informational percentage in the first period.
    pub percent_period_a: Option<Decimal>,
    /// Informational percentage in the second period.
    pub percent_period_b: Option<Decimal>,
    /// One of the two values was missing and substituted by 0.
    pub incomplete: bool,
}

/// Relative change between periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "Option<Decimal>")]
pub enum PercentChange {
    /// Change in percent.
    Defined(Decimal),
    /// Zero base with a nonzero new value; shown as "N/A".
    Undefined,
}

impl PercentChange {
    /// Returns the percentage if defined.
    #[must_use]
    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Defined(value) => Some(value),
            Self::Undefined => None,
        }
    }

    /// Returns true if the percentage is defined.
    #[must_use]
    pub const fn is_defined(self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl From<PercentChange> for Option<Decimal> {
    fn from(change: PercentChange) -> Self {
        change.value()
    }
}

/// Absolute and relative change for one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    /// `value_period_b - value_period_a`.
    pub absolute: Decimal,
    /// `absolute / |value_period_a| * 100`.
    pub percent: PercentChange,
}

/// Variation bucket of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Above the high-growth threshold.
    HighGrowth,
    /// Between the moderate- and high-growth thresholds.
    ModerateGrowth,
    /// Within the stable band (boundaries included).
    Stable,
    /// Between the high- and moderate-decline thresholds.
    ModerateDecline,
    /// Below the high-decline threshold.
    HighDecline,
    /// Percent change is undefined.
    Undefined,
}

impl Classification {
    /// Every classification, in display order.
    pub const ALL: [Self; 6] = [
        Self::HighGrowth,
        Self::ModerateGrowth,
        Self::Stable,
        Self::ModerateDecline,
        Self::HighDecline,
        Self::Undefined,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighGrowth => "High growth",
            Self::ModerateGrowth => "Moderate growth",
            Self::Stable => "Stable",
            Self::ModerateDecline => "Moderate decline",
            Self::HighDecline => "High decline",
            Self::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A fully derived output row.
///
/// Derived fields are computed by the engine only, so this type can be
/// serialized for writers but never deserialized from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    /// Zero-based index of the source row.
    pub row: usize,
    /// Account name.
    pub name: String,
    /// Value in the first period.
    pub value_period_a: Decimal,
    /// Value in the second period.
    pub value_period_b: Decimal,
    /// Informational percentage in the first period.
    pub percent_period_a: Option<Decimal>,
    /// Informational percentage in the second period.
    pub percent_period_b: Option<Decimal>,
    /// One of the two values was missing and substituted by 0.
    pub incomplete: bool,
    /// `value_period_b - value_period_a`.
    pub difference_absolute: Decimal,
    /// Percent change, `null` when undefined.
    pub difference_percent: PercentChange,
    /// Variation bucket.
    pub classification: Classification,
}

impl AccountRecord {
    /// Combines a normalized account with its derived fields.
    #[must_use]
    pub fn new(account: NormalizedAccount, delta: Delta, classification: Classification) -> Self {
        Self {
            row: account.row,
            name: account.name,
            value_period_a: account.value_period_a,
            value_period_b: account.value_period_b,
            percent_period_a: account.percent_period_a,
            percent_period_b: account.percent_period_b,
            incomplete: account.incomplete,
            difference_absolute: delta.absolute,
            difference_percent: delta.percent,
            classification,
        }
    }

    /// Percent change if defined.
    #[must_use]
    pub const fn percent(&self) -> Option<Decimal> {
        self.difference_percent.value()
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Number of records per classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationCounts {
    /// High growth.
    pub high_growth: usize,
    /// Moderate growth.
    pub moderate_growth: usize,
    /// Stable.
    pub stable: usize,
    /// Moderate decline.
    pub moderate_decline: usize,
    /// High decline.
    pub high_decline: usize,
    /// Undefined percent change.
    pub undefined: usize,
}

impl ClassificationCounts {
    /// Counts one more record in `classification`.
    pub fn increment(&mut self, classification: Classification) {
        *self.slot(classification) += 1;
    }

    /// Count for one classification.
    #[must_use]
    pub const fn get(&self, classification: Classification) -> usize {
        match classification {
            Classification::HighGrowth => self.high_growth,
            Classification::ModerateGrowth => self.moderate_growth,
            Classification::Stable => self.stable,
            Classification::ModerateDecline => self.moderate_decline,
            Classification::HighDecline => self.high_decline,
            Classification::Undefined => self.undefined,
        }
    }

    /// Records in the five defined buckets (excludes `Undefined`).
    #[must_use]
    pub const fn classified_total(&self) -> usize {
        self.high_growth + self.moderate_growth + self.stable + self.moderate_decline + self.high_decline
    }

    fn slot(&mut self, classification: Classification) -> &mut usize {
        match classification {
            Classification::HighGrowth => &mut self.high_growth,
            Classification::ModerateGrowth => &mut self.moderate_growth,
            Classification::Stable => &mut self.stable,
            Classification::ModerateDecline => &mut self.moderate_decline,
            Classification::HighDecline => &mut self.high_decline,
            Classification::Undefined => &mut self.undefined,
        }
    }
}

/// The account holding an extreme percent change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountExtreme {
    /// Zero-based index of the source row.
    pub row: usize,
    /// Account name.
    pub name: String,
    /// Percent change.
    pub percent: Decimal,
}

/// Aggregate statistics over a full record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStatistics {
    /// Records in the full table (including undefined percent).
    pub total_accounts: usize,
    /// Records with a defined percent change.
    pub defined_percent_accounts: usize,
    /// Records with a substituted value.
    pub incomplete_accounts: usize,
    /// Sum of first-period values, `None` if it overflows.
    pub total_period_a: Option<Decimal>,
    /// Sum of second-period values, `None` if it overflows.
    pub total_period_b: Option<Decimal>,
    /// Sum of absolute differences, `None` if it overflows.
    pub total_difference: Option<Decimal>,
    /// Mean absolute difference over all records.
    pub mean_difference_absolute: Option<Decimal>,
    /// Median absolute difference over all records.
    pub median_difference_absolute: Option<Decimal>,
    /// Mean percent change over records with a defined percent.
    pub mean_difference_percent: Option<Decimal>,
    /// Median percent change over records with a defined percent.
    pub median_difference_percent: Option<Decimal>,
    /// Records per classification.
    pub classification_counts: ClassificationCounts,
    /// Records whose absolute difference is positive.
    pub positive_variations: usize,
    /// Records whose absolute difference is negative.
    pub negative_variations: usize,
    /// Records whose absolute difference is zero.
    pub unchanged_variations: usize,
    /// Highest defined percent change.
    pub max_growth: Option<AccountExtreme>,
    /// Lowest defined percent change.
    pub max_decline: Option<AccountExtreme>,
}

/// Ordering used by a ranked subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKind {
    /// Positive percent change, highest first.
    TopGrowth,
    /// Negative percent change, lowest first.
    TopDecline,
    /// Second-period value, highest first.
    LargestAccounts,
}

/// A bounded, sorted slice of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedSubset {
    /// Ordering of `records`.
    pub kind: RankingKind,
    /// Maximum number of records.
    pub limit: usize,
    /// Records in rank order.
    pub records: Vec<AccountRecord>,
}

impl RankedSubset {
    /// Number of ranked records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Account names in rank order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}

/// Everything external report writers need, with no presentation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDataset {
    /// Every record in input order.
    pub records: Vec<AccountRecord>,
    /// Aggregate statistics.
    pub summary: SummaryStatistics,
    /// Largest positive percent changes.
    pub top_growth: RankedSubset,
    /// Largest negative percent changes.
    pub top_decline: RankedSubset,
    /// Largest second-period values.
    pub largest_accounts: RankedSubset,
}

// ============================================================================
// Warnings
// ============================================================================

/// A non-fatal observation made while normalizing rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// Name already used by an earlier row; both rows are kept.
    DuplicateName {
        /// Shared name.
        name: String,
        /// Row of the first occurrence.
        first_row: usize,
        /// Row of this occurrence.
        row: usize,
    },
    /// Text cell that could not be read as a number; treated as missing.
    UnparseableValue {
        /// Row index.
        row: usize,
        /// Cell.
        field: RowField,
        /// Original text.
        raw: String,
    },
    /// One period value missing; substituted by 0.
    IncompleteRow {
        /// Row index.
        row: usize,
        /// Missing cell.
        missing: RowField,
    },
    /// Row without any content, dropped.
    BlankRow {
        /// Row index.
        row: usize,
    },
    /// Row whose two values are zero, dropped.
    ZeroRow {
        /// Row index.
        row: usize,
    },
    /// Invalid row dropped in skip mode.
    SkippedRow {
        /// Validation failure.
        error: ValidationError,
    },
}

impl AnalysisWarning {
    /// Row the warning refers to.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::DuplicateName { row, .. }
            | Self::UnparseableValue { row, .. }
            | Self::IncompleteRow { row, .. }
            | Self::BlankRow { row }
            | Self::ZeroRow { row } => *row,
            Self::SkippedRow { error } => error.row,
        }
    }
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName {
                name,
                first_row,
                row,
            } => write!(f, "row {row}: duplicate account name '{name}' (first seen at row {first_row})"),
            Self::UnparseableValue { row, field, raw } => {
                write!(f, "row {row}: could not parse {field} '{raw}', treated as missing")
            }
            Self::IncompleteRow { row, missing } => {
                write!(f, "row {row}: {missing} is missing, using 0")
            }
            Self::BlankRow { row } => write!(f, "row {row}: blank row skipped"),
            Self::ZeroRow { row } => write!(f, "row {row}: both values are zero, row skipped"),
            Self::SkippedRow { error } => write!(f, "{error}; row skipped"),
        }
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Dataset for report writers.
    pub dataset: ReportDataset,
    /// Non-fatal observations for the caller to log.
    pub warnings: Vec<AnalysisWarning>,
}
