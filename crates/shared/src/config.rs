//! Application configuration management.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::types::NumberFormat;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input configuration.
    pub input: InputConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Analysis parameters handed to the engine.
    pub analysis: AnalysisSettings,
    /// Number parsing and display format.
    pub number_format: NumberFormat,
}

/// Supported input layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// JSON array of row objects.
    #[default]
    Json,
    /// CSV with positional columns: name, value A, percent A, value B, percent B.
    Csv,
}

/// Input configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path of the input file.
    pub path: PathBuf,
    /// Layout of the input file.
    pub format: InputFormat,
    /// Whether a CSV input starts with a header row.
    pub has_headers: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("accounts.json"),
            format: InputFormat::Json,
            has_headers: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the dataset file to write.
    pub path: PathBuf,
    /// Copy an existing output file to `<path>.backup` before overwriting it.
    pub backup: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("comparison.json"),
            backup: true,
        }
    }
}

/// Analysis parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Percent change above which growth is high.
    pub high_growth: Decimal,
    /// Percent change above which growth is moderate.
    pub moderate_growth: Decimal,
    /// Percent change below which decline is moderate.
    pub moderate_decline: Decimal,
    /// Percent change below which decline is high.
    pub high_decline: Decimal,
    /// Size of each ranked subset.
    pub top_n: usize,
    /// Fail on the first invalid row instead of skipping it.
    pub strict: bool,
    /// Leave rows with a missing value out of the growth/decline rankings.
    pub exclude_incomplete_from_rankings: bool,
    /// Drop rows with no name and no values instead of rejecting them for
    /// their empty name. On by default, so a blank row never fails a strict run.
    pub skip_blank_rows: bool,
    /// Drop rows whose two values are both zero.
    pub skip_zero_rows: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            high_growth: Decimal::from(20),
            moderate_growth: Decimal::from(5),
            moderate_decline: Decimal::from(-5),
            high_decline: Decimal::from(-20),
            top_n: 10,
            strict: true,
            exclude_incomplete_from_rankings: false,
            skip_blank_rows: true,
            skip_zero_rows: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from config files and environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `COMPARO__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is inconsistent.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::load_from(&[
            "config/default".to_string(),
            format!("config/{run_mode}"),
        ])
    }

    /// Loads configuration from the given files (extension optional) and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result is inconsistent.
    pub fn load_from(files: &[String]) -> AppResult<Self> {
        let mut builder = config::Config::builder();
        for file in files {
            builder = builder.add_source(config::File::with_name(file).required(false));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix("COMPARO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when thresholds are out of order or the
    /// number separators collide.
    pub fn validate(&self) -> AppResult<()> {
        let a = &self.analysis;
        if !(a.high_growth >= a.moderate_growth
            && a.moderate_growth >= a.moderate_decline
            && a.moderate_decline >= a.high_decline)
        {
            return Err(AppError::Config(format!(
                "thresholds must be ordered high_growth >= moderate_growth >= moderate_decline >= high_decline (got {}, {}, {}, {})",
                a.high_growth, a.moderate_growth, a.moderate_decline, a.high_decline
            )));
        }

        if !self.number_format.is_unambiguous() {
            return Err(AppError::Config(format!(
                "decimal and thousands separators must differ (both '{}')",
                self.number_format.decimal_separator
            )));
        }

        Ok(())
    }
}
