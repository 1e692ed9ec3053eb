//! CSV report ingestion.
//!
//! Reports are cumulative tables with at least `date`, a region column
//! (`region`, `state` or `country`), `cases` and `deaths`. Any other columns
//! (e.g. `fips`) are ignored.

use std::{
    io::Read,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::{
    config::Settings,
    data::dataset::{Dataset, Observation},
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no csv report found in {}", .0.display())]
    NoReport(PathBuf),
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing report row {line}: {source}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("report contains no rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct ReportRow {
    date: NaiveDate,
    #[serde(alias = "state", alias = "country")]
    region: String,
    cases: u64,
    deaths: u64,
}

impl From<ReportRow> for Observation {
    fn from(row: ReportRow) -> Self {
        Observation::new(row.date, row.region, row.cases, row.deaths)
    }
}

/// Resolve the report path: `DATA_FILE` when configured, otherwise the newest
/// report in the data directory.
pub fn resolve_report(settings: &Settings) -> Result<PathBuf, LoadError> {
    match &settings.data_file {
        Some(path) => Ok(path.clone()),
        None => latest_report(&settings.data_dir),
    }
}

/// Pick the lexicographically last `.csv` file in `dir`.
///
/// Reports are named by date, so this is the most recent one.
pub fn latest_report(dir: &Path) -> Result<PathBuf, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("csv") {
            candidates.push(path);
        }
    }
    candidates.sort();
    candidates
        .pop()
        .ok_or_else(|| LoadError::NoReport(dir.to_path_buf()))
}

/// Load a report file into an immutable dataset.
pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    info!(
        path = %path.display(),
        rows = dataset.len(),
        regions = dataset.regions().len(),
        "loaded case report"
    );
    Ok(dataset)
}

/// Parse report rows from any reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let mut observations = Vec::new();
    for result in reader.deserialize::<ReportRow>() {
        let row = result.map_err(|source| LoadError::Row {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;
        observations.push(row.into());
    }
    if observations.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(Dataset::new(observations))
}

/// Resolve and load the configured report.
pub fn load(settings: &Settings) -> Result<Dataset, LoadError> {
    let path = resolve_report(settings)?;
    load_path(&path)
}
