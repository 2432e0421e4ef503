//! Comparison error types.

use std::fmt;

use comparo_shared::AppError;
use serde::Serialize;
use thiserror::Error;

/// Field of an input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    /// Account name.
    Name,
    /// Value in the first period.
    ValueA,
    /// Informational percentage in the first period.
    PercentA,
    /// Value in the second period.
    ValueB,
    /// Informational percentage in the second period.
    PercentB,
    /// Both period values taken together.
    Values,
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::ValueA => write!(f, "value_a"),
            Self::PercentA => write!(f, "percent_a"),
            Self::ValueB => write!(f, "value_b"),
            Self::PercentB => write!(f, "percent_b"),
            Self::Values => write!(f, "value_a/value_b"),
        }
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    /// Name is missing or blank after trimming.
    #[error("account name is empty")]
    EmptyName,

    /// Neither period value is present or parseable.
    #[error("both period values are missing")]
    MissingValues,

    /// The difference between the two values does not fit in a `Decimal`.
    #[error("period values are too far apart to compare")]
    OutOfRange,
}

/// A malformed or unusable input row.
///
/// This is the only error the analysis engine raises.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Invalid row {row} ({field}): {reason}")]
pub struct ValidationError {
    /// Zero-based index of the row in the input sequence.
    pub row: usize,
    /// Offending field.
    pub field: RowField,
    /// Reason for rejection.
    pub reason: ValidationReason,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub const fn new(row: usize, field: RowField, reason: ValidationReason) -> Self {
        Self { row, field, reason }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_row_and_field() {
        let err = ValidationError::new(3, RowField::Name, ValidationReason::EmptyName);
        assert_eq!(err.to_string(), "Invalid row 3 (name): account name is empty");

        let err = ValidationError::new(0, RowField::Values, ValidationReason::MissingValues);
        assert_eq!(
            err.to_string(),
            "Invalid row 0 (value_a/value_b): both period values are missing"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = ValidationError::new(2, RowField::Values, ValidationReason::OutOfRange);
        assert_eq!(
            err.to_string(),
            "Invalid row 2 (value_a/value_b): period values are too far apart to compare"
        );
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError =
            ValidationError::new(7, RowField::Name, ValidationReason::EmptyName).into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("row 7"));
    }
}
