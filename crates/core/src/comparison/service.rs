//! Comparison pipeline: normalize, derive, classify, aggregate.

use tracing::{debug, info, warn};

use super::classifier::classify;
use super::delta::compute_delta;
use super::error::ValidationError;
use super::normalizer::{NormalizedRows, normalize_rows};
use super::ranking::{largest_accounts, top_decline, top_growth};
use super::statistics::summarize;
use super::types::{
    AccountRecord, AnalysisOptions, AnalysisReport, NormalizedAccount, RawRow, ReportDataset,
    Thresholds,
};

/// Service for comparing two reporting periods.
pub struct ComparisonService;

impl ComparisonService {
    /// Runs the full analysis over raw rows.
    ///
    /// The input is never modified; the same rows and options always produce
    /// the same report.
    ///
    /// # Errors
    ///
    /// Returns the first invalid row in strict mode. See [`normalize_rows`].
    pub fn analyze(
        rows: &[RawRow],
        options: &AnalysisOptions,
    ) -> Result<AnalysisReport, ValidationError> {
        let NormalizedRows { accounts, warnings } = normalize_rows(rows, options)?;

        for warning in &warnings {
            warn!(row = warning.row(), "{warning}");
        }

        let records: Vec<AccountRecord> = accounts
            .into_iter()
            .map(|account| Self::derive_record(account, &options.thresholds))
            .collect();

        let dataset = Self::build_dataset(records, options);

        info!(
            accounts = dataset.summary.total_accounts,
            undefined = dataset.summary.classification_counts.undefined,
            warnings = warnings.len(),
            "Comparison complete"
        );

        Ok(AnalysisReport { dataset, warnings })
    }

    /// Computes the derived fields of one normalized account.
    #[must_use]
    pub fn derive_record(account: NormalizedAccount, thresholds: &Thresholds) -> AccountRecord {
        let delta = compute_delta(account.value_period_a, account.value_period_b);
        let classification = classify(delta.percent, thresholds);
        AccountRecord::new(account, delta, classification)
    }

    /// Assembles the dataset handed to report writers.
    ///
    /// `records` keeps its order; rankings are computed over the full set.
    #[must_use]
    pub fn build_dataset(records: Vec<AccountRecord>, options: &AnalysisOptions) -> ReportDataset {
        let summary = summarize(&records);
        let top_growth = top_growth(&records, options.top_n, options.incomplete_policy);
        let top_decline = top_decline(&records, options.top_n, options.incomplete_policy);
        let largest_accounts = largest_accounts(&records, options.top_n);

        debug!(
            top_growth = top_growth.len(),
            top_decline = top_decline.len(),
            largest = largest_accounts.len(),
            "Rankings built"
        );

        ReportDataset {
            records,
            summary,
            top_growth,
            top_decline,
            largest_accounts,
        }
    }
}
