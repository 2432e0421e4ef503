//! Row cleaning and validation.
//!
//! Turns raw spreadsheet rows into [`NormalizedAccount`]s:
//! - names are trimmed and must not be empty
//! - numeric cells pass through, text cells are parsed with the configured
//!   [`NumberFormat`]; unparseable text counts as missing
//! - a single missing period value becomes `0` and flags the row as incomplete
//! - rows missing both values are rejected
//! - rows whose difference overflows `Decimal` are rejected
//!
//! Duplicate names are kept and reported as warnings.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use comparo_shared::NumberFormat;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::{RowField, ValidationError, ValidationReason};
use super::types::{AnalysisOptions, AnalysisWarning, ErrorMode, NormalizedAccount, RawCell, RawRow};

/// Output of [`normalize_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRows {
    /// Accepted accounts in input order.
    pub accounts: Vec<NormalizedAccount>,
    /// Non-fatal observations.
    pub warnings: Vec<AnalysisWarning>,
}

/// Validates and cleans every row.
///
/// # Errors
///
/// In [`ErrorMode::Strict`], returns the first row that has an empty name or
/// no usable period value. In [`ErrorMode::SkipInvalid`] such rows are dropped
/// and reported as [`AnalysisWarning::SkippedRow`] instead.
pub fn normalize_rows(
    rows: &[RawRow],
    options: &AnalysisOptions,
) -> Result<NormalizedRows, ValidationError> {
    let mut accounts = Vec::with_capacity(rows.len());
    let mut warnings = Vec::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        if options.skip_blank_rows && row.is_blank() {
            warnings.push(AnalysisWarning::BlankRow { row: index });
            continue;
        }

        let account = match normalize_row(index, row, &options.number_format, &mut warnings) {
            Ok(account) => account,
            Err(error) => match options.error_mode {
                ErrorMode::Strict => return Err(error),
                ErrorMode::SkipInvalid => {
                    warnings.push(AnalysisWarning::SkippedRow { error });
                    continue;
                }
            },
        };

        if options.skip_zero_rows
            && account.value_period_a.is_zero()
            && account.value_period_b.is_zero()
        {
            warnings.push(AnalysisWarning::ZeroRow { row: index });
            continue;
        }

        match first_seen.entry(account.name.clone()) {
            Entry::Occupied(first) => warnings.push(AnalysisWarning::DuplicateName {
                name: account.name.clone(),
                first_row: *first.get(),
                row: index,
            }),
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }

        accounts.push(account);
    }

    debug!(
        rows = rows.len(),
        accepted = accounts.len(),
        warnings = warnings.len(),
        "Rows normalized"
    );

    Ok(NormalizedRows { accounts, warnings })
}

fn normalize_row(
    index: usize,
    row: &RawRow,
    format: &NumberFormat,
    warnings: &mut Vec<AnalysisWarning>,
) -> Result<NormalizedAccount, ValidationError> {
    let name = row
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::new(index, RowField::Name, ValidationReason::EmptyName))?;

    let value_a = parse_cell(index, RowField::ValueA, row.value_a.as_ref(), format, warnings);
    let value_b = parse_cell(index, RowField::ValueB, row.value_b.as_ref(), format, warnings);

    let (value_period_a, value_period_b, incomplete) = match (value_a, value_b) {
        (Some(a), Some(b)) => (a, b, false),
        (Some(a), None) => {
            warnings.push(AnalysisWarning::IncompleteRow {
                row: index,
                missing: RowField::ValueB,
            });
            (a, Decimal::ZERO, true)
        }
        (None, Some(b)) => {
            warnings.push(AnalysisWarning::IncompleteRow {
                row: index,
                missing: RowField::ValueA,
            });
            (Decimal::ZERO, b, true)
        }
        (None, None) => {
            return Err(ValidationError::new(
                index,
                RowField::Values,
                ValidationReason::MissingValues,
            ));
        }
    };

    if value_period_b.checked_sub(value_period_a).is_none() {
        return Err(ValidationError::new(
            index,
            RowField::Values,
            ValidationReason::OutOfRange,
        ));
    }

    Ok(NormalizedAccount {
        row: index,
        name: name.to_string(),
        value_period_a,
        value_period_b,
        percent_period_a: parse_cell(index, RowField::PercentA, row.percent_a.as_ref(), format, warnings),
        percent_period_b: parse_cell(index, RowField::PercentB, row.percent_b.as_ref(), format, warnings),
        incomplete,
    })
}

fn parse_cell(
    index: usize,
    field: RowField,
    cell: Option<&RawCell>,
    format: &NumberFormat,
    warnings: &mut Vec<AnalysisWarning>,
) -> Option<Decimal> {
    match cell? {
        RawCell::Number(value) => Some(*value),
        RawCell::Text(text) if text.trim().is_empty() => None,
        RawCell::Text(text) => {
            let parsed = format.parse_amount(text);
            if parsed.is_none() {
                warnings.push(AnalysisWarning::UnparseableValue {
                    row: index,
                    field,
                    raw: text.clone(),
                });
            }
            parsed
        }
    }
}
