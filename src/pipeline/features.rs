//! Derived risk features: overweight flag and binarized cholesterol/glucose levels

use anyhow::{Context, Result};
use polars::prelude::*;

/// BMI above which a record is flagged as overweight
pub const DEFAULT_BMI_THRESHOLD: f64 = 25.0;

/// Ordinal level columns that are collapsed to normal (0) / above normal (1)
pub const LEVEL_COLUMNS: [&str; 2] = ["cholesterol", "gluc"];

/// Name of the derived overweight column
pub const OVERWEIGHT_COLUMN: &str = "overweight";

/// `overweight` as 1 when `weight / (height/100)^2` exceeds the threshold, else 0.
///
/// Heights are not checked for being positive.
pub fn overweight_expr(bmi_threshold: f64) -> Expr {
    let height_m = col("height").cast(DataType::Float64) / lit(100.0);
    let bmi = col("weight").cast(DataType::Float64) / (height_m.clone() * height_m);

    when(bmi.gt(lit(bmi_threshold)))
        .then(lit(1i32))
        .otherwise(lit(0i32))
        .alias(OVERWEIGHT_COLUMN)
}

/// Collapse an ordinal level column (1 = normal, 2/3 = above normal) to 0/1.
///
/// Anything not above 1 maps to 0, including codes below 1. Re-applying the
/// rule turns an already binarized 1 into 0, so it must run once per load.
pub fn binarize_expr(name: &str) -> Expr {
    when(col(name).gt(lit(1)))
        .then(lit(1i32))
        .otherwise(lit(0i32))
        .alias(name)
}

/// Add the `overweight` column and binarize `cholesterol` and `gluc`.
///
/// `overweight` is appended as the last column; the level columns are
/// replaced in place.
pub fn derive_features(df: &DataFrame, bmi_threshold: f64) -> Result<DataFrame> {
    let mut exprs: Vec<Expr> = LEVEL_COLUMNS.iter().map(|name| binarize_expr(name)).collect();
    exprs.push(overweight_expr(bmi_threshold));

    df.clone()
        .lazy()
        .with_columns(exprs)
        .collect()
        .context("Failed to derive overweight and level features")
}
