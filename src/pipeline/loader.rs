//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Load an examination dataset from a file (CSV or Parquet based on extension)
///
/// # Arguments
/// * `path` - Input file path
/// * `infer_schema_length` - Rows used for CSV schema inference (0 = full scan)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Estimated in-memory size of a loaded dataset in megabytes
pub fn estimated_memory_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}

/// Extract a column as `i32` values, casting if needed.
///
/// A null cell is an error naming the column and row.
pub fn column_as_i32(df: &DataFrame, name: &str) -> Result<Vec<i32>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found in dataset", name))?;
    let cast = column
        .cast(&DataType::Int32)
        .with_context(|| format!("Column '{}' must be numeric", name))?;

    cast.i32()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                anyhow::anyhow!("Column '{}' has a missing value at row {}", name, row)
            })
        })
        .collect()
}

/// Extract a column as `f64` values, casting if needed.
///
/// A null cell is an error naming the column and row.
pub fn column_as_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found in dataset", name))?;
    let cast = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' must be numeric", name))?;

    cast.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| {
                anyhow::anyhow!("Column '{}' has a missing value at row {}", name, row)
            })
        })
        .collect()
}
