//! Outlier filtering and matrix preparation for the correlation heat map

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::correlation::{compute_correlation_matrix, CorrelationMatrix, TriangleMask};
use super::loader::column_as_f64;
use super::stats::quantile_linear;

pub const DEFAULT_LOWER_QUANTILE: f64 = 0.025;
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.975;

/// Inclusive value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

/// Quantile bounds for height and weight, taken from the unfiltered table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutlierBounds {
    pub height: Bounds,
    pub weight: Bounds,
}

/// Everything the heat map renderer needs
#[derive(Debug, Clone)]
pub struct HeatMapData {
    pub bounds: OutlierBounds,
    pub retained_rows: usize,
    pub matrix: CorrelationMatrix,
    pub mask: TriangleMask,
}

/// Check that `0 <= lower <= upper <= 1`
pub fn validate_quantiles(lower: f64, upper: f64) -> Result<()> {
    for q in [lower, upper] {
        if !(0.0..=1.0).contains(&q) {
            anyhow::bail!("Quantile must be between 0.0 and 1.0, got {}", q);
        }
    }
    if lower > upper {
        anyhow::bail!(
            "Lower quantile ({}) must not exceed upper quantile ({})",
            lower,
            upper
        );
    }
    Ok(())
}

fn column_bounds(df: &DataFrame, name: &str, lower: f64, upper: f64) -> Result<Bounds> {
    let values = column_as_f64(df, name)?;
    let low = quantile_linear(&values, lower);
    let high = quantile_linear(&values, upper);
    match (low, high) {
        (Some(low), Some(high)) => Ok(Bounds { low, high }),
        _ => anyhow::bail!("Cannot compute quantiles of empty column '{}'", name),
    }
}

/// Compute height and weight bounds from the full (unfiltered) table
pub fn compute_outlier_bounds(df: &DataFrame, lower: f64, upper: f64) -> Result<OutlierBounds> {
    validate_quantiles(lower, upper)?;
    Ok(OutlierBounds {
        height: column_bounds(df, "height", lower, upper)?,
        weight: column_bounds(df, "weight", lower, upper)?,
    })
}

/// Keep records with `ap_lo <= ap_hi` and height/weight inside the bounds
pub fn filter_outliers(df: &DataFrame, bounds: &OutlierBounds) -> Result<DataFrame> {
    let keep = col("ap_lo")
        .lt_eq(col("ap_hi"))
        .and(col("height").gt_eq(lit(bounds.height.low)))
        .and(col("height").lt_eq(lit(bounds.height.high)))
        .and(col("weight").gt_eq(lit(bounds.weight.low)))
        .and(col("weight").lt_eq(lit(bounds.weight.high)));

    df.clone()
        .lazy()
        .filter(keep)
        .collect()
        .context("Failed to filter outlier records")
}

/// Filter the table, then build the correlation matrix and its mask
pub fn prepare_heat_map(df: &DataFrame, lower: f64, upper: f64) -> Result<HeatMapData> {
    let bounds = compute_outlier_bounds(df, lower, upper)?;
    let filtered = filter_outliers(df, &bounds)?;
    let matrix = compute_correlation_matrix(&filtered)?;
    let mask = matrix.upper_triangle_mask();

    Ok(HeatMapData {
        bounds,
        retained_rows: filtered.height(),
        matrix,
        mask,
    })
}
