//! Dataset file output and console summary.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comparo_core::comparison::{Classification, RankedSubset, ReportDataset};
use comparo_shared::NumberFormat;
use rust_decimal::Decimal;
use tracing::info;

/// Path used to keep the previous output file.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

/// Copies an existing file to its backup path. Returns the backup path if a
/// copy was made.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let backup = backup_path(path);
    fs::copy(path, &backup)
        .with_context(|| format!("backing up {} to {}", path.display(), backup.display()))?;
    info!(path = %backup.display(), "Previous output backed up");
    Ok(Some(backup))
}

/// Writes the dataset as pretty-printed JSON, creating parent directories.
pub fn write_dataset(path: &Path, dataset: &ReportDataset) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, dataset)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), records = dataset.records.len(), "Dataset written");
    Ok(())
}

/// Console summary of a dataset, rendered through `Display`.
pub struct Summary<'a> {
    dataset: &'a ReportDataset,
    format: &'a NumberFormat,
}

impl<'a> Summary<'a> {
    pub fn new(dataset: &'a ReportDataset, format: &'a NumberFormat) -> Self {
        Self { dataset, format }
    }

    fn amount(&self, value: Option<Decimal>) -> String {
        value.map_or_else(|| "N/A".to_string(), |v| self.format.format_amount(v))
    }

    fn ranking(&self, f: &mut fmt::Formatter<'_>, title: &str, subset: &RankedSubset) -> fmt::Result {
        if subset.is_empty() {
            return Ok(());
        }

        writeln!(f, "\n{title}:")?;
        for (rank, record) in subset.records.iter().enumerate() {
            writeln!(
                f,
                "  {:>2}. {} {} ({} -> {})",
                rank + 1,
                record.name,
                self.format.format_percent(record.percent()),
                self.format.format_amount(record.value_period_a),
                self.format.format_amount(record.value_period_b),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = &self.dataset.summary;
        let format = self.format;

        writeln!(f, "=== Comparison summary ===")?;
        writeln!(f, "Accounts analyzed:   {}", summary.total_accounts)?;
        writeln!(f, "Total period A:      {}", self.amount(summary.total_period_a))?;
        writeln!(f, "Total period B:      {}", self.amount(summary.total_period_b))?;
        writeln!(f, "Total difference:    {}", self.amount(summary.total_difference))?;
        writeln!(
            f,
            "Average growth:      {}",
            format.format_percent(summary.mean_difference_percent)
        )?;
        writeln!(
            f,
            "Median growth:       {}",
            format.format_percent(summary.median_difference_percent)
        )?;
        writeln!(
            f,
            "Variations:          {} positive, {} negative, {} unchanged",
            summary.positive_variations, summary.negative_variations, summary.unchanged_variations
        )?;

        if let Some(extreme) = &summary.max_growth {
            writeln!(
                f,
                "Biggest growth:      {} ({})",
                extreme.name,
                format.format_percent(Some(extreme.percent))
            )?;
        }
        if let Some(extreme) = &summary.max_decline {
            writeln!(
                f,
                "Biggest decline:     {} ({})",
                extreme.name,
                format.format_percent(Some(extreme.percent))
            )?;
        }

        writeln!(f, "\nClassification:")?;
        for classification in Classification::ALL {
            writeln!(
                f,
                "  {:<18}{}",
                classification.label(),
                summary.classification_counts.get(classification)
            )?;
        }

        self.ranking(f, "Top growth", &self.dataset.top_growth)?;
        self.ranking(f, "Top decline", &self.dataset.top_decline)
    }
}
