//! Comparo command-line analyzer
//!
//! Reads account rows for two periods, runs the comparison engine, prints a
//! summary and writes the report dataset as JSON.

mod cli;
mod input;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use comparo_core::comparison::{AnalysisOptions, ComparisonService, RawRow, normalize_rows};
use comparo_shared::config::InputFormat;
use comparo_shared::{AppConfig, AppError};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    // Load configuration
    let mut config = AppConfig::load_from(&cli.config_files())?;
    cli.apply(&mut config);
    if cli.format.is_none() && cli.input.is_some() && input::is_csv_path(&config.input.path) {
        config.input.format = InputFormat::Csv;
    }
    config.validate()?;

    let options = AnalysisOptions::from(&config);
    let rows = input::read_rows(&config.input).map_err(|e| AppError::Input(format!("{e:#}")))?;
    info!(
        path = %config.input.path.display(),
        rows = rows.len(),
        "Input read"
    );

    if cli.validate {
        return Ok(validate(&rows, &options));
    }

    let report = ComparisonService::analyze(&rows, &options).map_err(AppError::from)?;

    print!("{}", output::Summary::new(&report.dataset, &config.number_format));

    let path = config.output.path.as_path();
    if config.output.backup {
        output::backup_existing(path).map_err(|e| AppError::Output(format!("{e:#}")))?;
    }
    output::write_dataset(path, &report.dataset).map_err(|e| AppError::Output(format!("{e:#}")))?;

    Ok(ExitCode::SUCCESS)
}

fn validate(rows: &[RawRow], options: &AnalysisOptions) -> ExitCode {
    match normalize_rows(rows, options) {
        Ok(normalized) => {
            for warning in &normalized.warnings {
                warn!(row = warning.row(), "{warning}");
            }
            println!(
                "Input is valid: {} accounts, {} warnings",
                normalized.accounts.len(),
                normalized.warnings.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(row = err.row, field = %err.field, "{err}");
            println!("Input is invalid: {err}");
            ExitCode::FAILURE
        }
    }
}
