//! Two-period comparative analysis.
//!
//! Pure business logic that turns raw account rows into a report dataset:
//! - Row normalization and validation
//! - Absolute and percent change per account
//! - Variation classification
//! - Rankings and summary statistics

pub mod classifier;
pub mod delta;
pub mod error;
pub mod normalizer;
pub mod ranking;
pub mod service;
pub mod statistics;
pub mod types;

#[cfg(test)]
mod tests;

pub use classifier::{classify, classify_percent};
pub use delta::compute_delta;
pub use error::{RowField, ValidationError, ValidationReason};
pub use normalizer::{NormalizedRows, normalize_rows};
pub use ranking::{largest_accounts, top_decline, top_growth};
pub use service::ComparisonService;
pub use statistics::summarize;
pub use types::*;
