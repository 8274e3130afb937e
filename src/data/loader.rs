//! CSV Loader
//! Reads the source CSV with Polars, normalizes column names and produces
//! the normalized payout table.

use polars::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use super::record::{ParsedRecord, PayoutRecord, RawRecord};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV not found at {0}")]
    SourceNotFound(PathBuf),
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Source column names resolved against the expected-column synonym set.
/// `None` means the source has no column for that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    pub date: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub payout: Option<String>,
}

/// Resolve source headers case-insensitively against the synonym set.
/// When several columns match the same field, the first matching column
/// in source order wins.
pub fn map_columns(headers: &[&str]) -> ColumnMap {
    let mut map = ColumnMap::default();
    for header in headers {
        let slot = match header.trim().to_lowercase().as_str() {
            "date" => &mut map.date,
            "name" => &mut map.name,
            "location" | "country" => &mut map.location,
            "payout" | "amount" => &mut map.payout,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(header.to_string());
        }
    }
    map
}

/// Load and normalize the payout table at `path`.
///
/// Fails only when the file is missing or unreadable as CSV; malformed
/// individual fields degrade to `None` and the completeness filter drops
/// those rows silently.
pub fn load(path: &Path) -> Result<Vec<PayoutRecord>, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::SourceNotFound(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    let raw_rows = extract_rows(&df)?;
    let total = raw_rows.len();

    let records: Vec<PayoutRecord> = raw_rows
        .par_iter()
        .map(ParsedRecord::from_raw)
        .filter_map(ParsedRecord::into_normalized)
        .collect();

    info!(
        path = %path.display(),
        rows = total,
        kept = records.len(),
        dropped = total - records.len(),
        "loaded payout table"
    );

    Ok(records)
}

/// Extract the mapped columns row-wise into raw records.
fn extract_rows(df: &DataFrame) -> Result<Vec<RawRecord>, LoaderError> {
    let headers: Vec<&str> = df
        .get_column_names()
        .iter()
        .map(|s| s.as_str())
        .collect();
    let map = map_columns(&headers);

    let date = column_values(df, map.date.as_deref())?;
    let name = column_values(df, map.name.as_deref())?;
    let location = column_values(df, map.location.as_deref())?;
    let payout = column_values(df, map.payout.as_deref())?;

    Ok((0..df.height())
        .map(|i| RawRecord {
            date: date[i].clone(),
            name: name[i].clone(),
            location: location[i].clone(),
            payout: payout[i].clone(),
        })
        .collect())
}

/// Read one column as optional strings, or all-`None` when the source
/// has no such column.
fn column_values(df: &DataFrame, name: Option<&str>) -> Result<Vec<Option<String>>, LoaderError> {
    let Some(name) = name else {
        return Ok(vec![None; df.height()]);
    };

    let col = df.column(name)?.cast(&DataType::String)?;
    let series = col.as_materialized_series();

    Ok((0..series.len())
        .map(|i| match series.get(i) {
            Ok(val) if !val.is_null() => Some(val.to_string().trim_matches('"').to_string()),
            _ => None,
        })
        .collect())
}
