//! JSON export of the reshaped data behind both charts

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CategoryCount, HeatMapData, OutlierBounds};

/// Metadata about the run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// Medviz version
    pub medviz_version: String,
    /// Input file path
    pub input_file: String,
    pub bmi_threshold: f64,
    pub lower_quantile: f64,
    pub upper_quantile: f64,
}

/// Correlation matrix with its display mask
#[derive(Serialize)]
pub struct CorrelationExport {
    pub columns: Vec<String>,
    /// Row-major values; NaN becomes `null`
    pub matrix: Vec<Vec<Option<f64>>>,
    /// `true` marks cells hidden from the heat map
    pub mask: Vec<Vec<bool>>,
    /// Records left after outlier filtering
    pub retained_rows: usize,
}

/// Complete export document
#[derive(Serialize)]
pub struct VisualizationExport<'a> {
    pub metadata: ExportMetadata,
    pub outlier_bounds: OutlierBounds,
    pub category_counts: &'a [CategoryCount],
    pub correlation: CorrelationExport,
}

/// Parameters recorded in the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub bmi_threshold: f64,
    pub lower_quantile: f64,
    pub upper_quantile: f64,
}

/// Build the export document without writing it
pub fn build_export<'a>(
    counts: &'a [CategoryCount],
    heat_map: &HeatMapData,
    params: &ExportParams,
) -> VisualizationExport<'a> {
    let matrix = &heat_map.matrix;
    let rows = (0..matrix.len())
        .map(|i| {
            matrix
                .row(i)
                .into_iter()
                .map(|v| if v.is_finite() { Some(v) } else { None })
                .collect()
        })
        .collect();

    VisualizationExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            medviz_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            bmi_threshold: params.bmi_threshold,
            lower_quantile: params.lower_quantile,
            upper_quantile: params.upper_quantile,
        },
        outlier_bounds: heat_map.bounds,
        category_counts: counts,
        correlation: CorrelationExport {
            columns: matrix.columns().to_vec(),
            matrix: rows,
            mask: heat_map.mask.rows(),
            retained_rows: heat_map.retained_rows,
        },
    }
}

/// Export counts, bounds, matrix and mask to a JSON file
pub fn export_json(
    counts: &[CategoryCount],
    heat_map: &HeatMapData,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_export(counts, heat_map, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize visualization data to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write export to {}", output_path.display()))?;

    Ok(())
}
