//! Input readers.
//!
//! JSON input is an array of row objects (`name`, `value_a`, `percent_a`,
//! `value_b`, `percent_b`). CSV input is positional: the first five columns
//! are read in that order and anything after them is ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use comparo_core::comparison::{RawCell, RawRow};
use comparo_shared::config::{InputConfig, InputFormat};
use tracing::debug;

/// Reads every row of the configured input file.
pub fn read_rows(config: &InputConfig) -> Result<Vec<RawRow>> {
    let path = config.path.as_path();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = BufReader::new(file);

    let rows = match config.format {
        InputFormat::Json => parse_json(reader),
        InputFormat::Csv => parse_csv(reader, config.has_headers),
    }
    .with_context(|| format!("reading {}", path.display()))?;

    debug!(path = %path.display(), rows = rows.len(), "Input loaded");
    Ok(rows)
}

/// Parses a JSON array of rows.
pub fn parse_json(reader: impl Read) -> Result<Vec<RawRow>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parses positional CSV rows. Empty cells are missing; every other cell is
/// kept as text for the normalizer to clean.
pub fn parse_csv(reader: impl Read, has_headers: bool) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(has_headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cell = |index: usize| {
            record
                .get(index)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(RawCell::from)
        };

        rows.push(RawRow {
            name: record
                .get(0)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            value_a: cell(1),
            percent_a: cell(2),
            value_b: cell(3),
            percent_b: cell(4),
        });
    }

    Ok(rows)
}

/// Returns true if the path looks like a CSV file.
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
