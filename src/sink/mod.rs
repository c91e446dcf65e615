//! CSV persistence. Every stage writes `{ISO date}-{logical name}.csv` under
//! a fixed output root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::error::ScrapeError;
use crate::normalize::NormalizedRecord;
use crate::table::Table;

pub const OUTPUT_DIR: &str = "output";

/// `{dir}/{%Y-%m-%d}-{logical}`, e.g. `output/2026-08-29-resumo.csv`.
pub fn output_path(dir: &Path, on: NaiveDate, logical: &str) -> PathBuf {
    dir.join(format!("{}-{logical}", on.format("%Y-%m-%d")))
}

fn open_writer(
    dir: &Path,
    on: NaiveDate,
    logical: &str,
) -> Result<(csv::Writer<fs::File>, PathBuf), ScrapeError> {
    fs::create_dir_all(dir).map_err(|e| ScrapeError::persist(logical, e.into()))?;
    let path = output_path(dir, on, logical);
    let writer = csv::Writer::from_path(&path).map_err(|e| ScrapeError::persist(logical, e))?;
    Ok((writer, path))
}

/// Writes a table, headers first. Not retried; the caller decides how fatal
/// the failure is.
pub fn write_table(
    table: &Table,
    dir: &Path,
    logical: &str,
    on: NaiveDate,
) -> Result<PathBuf, ScrapeError> {
    let (mut writer, path) = open_writer(dir, on, logical)?;
    writer
        .write_record(table.headers())
        .map_err(|e| ScrapeError::persist(logical, e))?;
    for row in table.rows() {
        writer
            .write_record(row)
            .map_err(|e| ScrapeError::persist(logical, e))?;
    }
    writer
        .flush()
        .map_err(|e| ScrapeError::persist(logical, e.into()))?;
    info!(path = %path.display(), rows = table.len(), "persisted");
    Ok(path)
}

/// Serializes the summary records; the header row comes from the record's
/// serde field names.
pub fn write_records(
    records: &[NormalizedRecord],
    dir: &Path,
    logical: &str,
    on: NaiveDate,
) -> Result<PathBuf, ScrapeError> {
    let (mut writer, path) = open_writer(dir, on, logical)?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| ScrapeError::persist(logical, e))?;
    }
    writer
        .flush()
        .map_err(|e| ScrapeError::persist(logical, e.into()))?;
    info!(path = %path.display(), rows = records.len(), "persisted");
    Ok(path)
}

/// Reads back a CSV written by [`write_table`]. Cells stay strings; the
/// currency column is never re-parsed as numeric.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read headers from {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record.with_context(|| format!("CSV parse error in {}", path.display()))?;
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}
