//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use comparo_shared::AppConfig;
use comparo_shared::config::InputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "comparo",
    version,
    about = "Compare account values between two reporting periods"
)]
pub struct Cli {
    /// Extra configuration file, layered over config/default and config/{RUN_MODE}
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input file (overrides input.path)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output JSON file (overrides output.path)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input format (overrides input.format)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Size of each ranking (overrides analysis.top_n)
    #[arg(long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Skip invalid rows instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Only validate the input, write nothing
    #[arg(long)]
    pub validate: bool,

    /// Do not back up an existing output file
    #[arg(long)]
    pub no_backup: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "comparo=info,comparo_core=info")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
        }
    }
}

impl Cli {
    /// Configuration files to load, in precedence order.
    pub fn config_files(&self) -> Vec<String> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let mut files = vec!["config/default".to_string(), format!("config/{run_mode}")];
        if let Some(path) = &self.config {
            files.push(path.display().to_string());
        }
        files
    }

    /// Writes flag overrides into a loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(input) = &self.input {
            config.input.path.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.path.clone_from(output);
        }
        if let Some(format) = self.format {
            config.input.format = format.into();
        }
        if let Some(top_n) = self.top_n {
            config.analysis.top_n = top_n;
        }
        if self.lenient {
            config.analysis.strict = false;
        }
        if self.no_backup {
            config.output.backup = false;
        }
    }
}
