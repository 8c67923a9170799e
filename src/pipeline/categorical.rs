//! Risk-factor counts split by cardiovascular outcome

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::loader::column_as_i32;

/// Outcome column that splits the counts into facets
pub const OUTCOME_COLUMN: &str = "cardio";

/// Binary risk columns unpivoted into long form, in output order
pub const RISK_VARIABLES: [&str; 6] = ["active", "alco", "cholesterol", "gluc", "overweight", "smoke"];

/// Codes always present in the count table, even with zero occurrences
const BINARY_CODES: [i32; 2] = [0, 1];

/// Number of records with a given (cardio, variable, value) combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub cardio: i32,
    pub variable: String,
    pub value: i32,
    pub total: u32,
}

/// Long-form count table, sorted by (cardio, variable, value)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    rows: Vec<CategoryCount>,
}

impl CategoryCounts {
    pub fn rows(&self) -> &[CategoryCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for one combination, 0 when absent
    pub fn total_for(&self, cardio: i32, variable: &str, value: i32) -> u32 {
        self.rows
            .iter()
            .find(|r| r.cardio == cardio && r.variable == variable && r.value == value)
            .map(|r| r.total)
            .unwrap_or(0)
    }

    /// Distinct outcome codes, ascending
    pub fn cardio_values(&self) -> Vec<i32> {
        let mut values: Vec<i32> = self.rows.iter().map(|r| r.cardio).collect();
        values.dedup();
        values
    }

    /// Distinct risk values, ascending
    pub fn values(&self) -> Vec<i32> {
        let mut values: Vec<i32> = self.rows.iter().map(|r| r.value).collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    /// Variables in table order
    pub fn variables(&self) -> Vec<String> {
        let mut variables: Vec<String> = Vec::new();
        for row in &self.rows {
            if !variables.contains(&row.variable) {
                variables.push(row.variable.clone());
            }
        }
        variables
    }

    pub fn max_total(&self) -> u32 {
        self.rows.iter().map(|r| r.total).max().unwrap_or(0)
    }

    /// Flatten into a DataFrame with columns `cardio`, `variable`, `value`, `total`.
    ///
    /// Used for inspection and for callers that want the table in polars;
    /// the renderers and the JSON export read `rows()` directly.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let cardio: Vec<i32> = self.rows.iter().map(|r| r.cardio).collect();
        let variable: Vec<&str> = self.rows.iter().map(|r| r.variable.as_str()).collect();
        let value: Vec<i32> = self.rows.iter().map(|r| r.value).collect();
        let total: Vec<u32> = self.rows.iter().map(|r| r.total).collect();

        df! {
            "cardio" => cardio,
            "variable" => variable,
            "value" => value,
            "total" => total,
        }
        .context("Failed to build category count table")
    }
}

/// Unpivot the risk columns into long form with columns `cardio`, `variable`, `value`.
///
/// Every record yields one row per risk variable; rows are grouped by
/// variable in `RISK_VARIABLES` order, records in table order within each.
pub fn unpivot_risk_factors(df: &DataFrame) -> Result<DataFrame> {
    let cardio = column_as_i32(df, OUTCOME_COLUMN)?;
    let capacity = cardio.len() * RISK_VARIABLES.len();

    let mut long_cardio: Vec<i32> = Vec::with_capacity(capacity);
    let mut long_variable: Vec<&str> = Vec::with_capacity(capacity);
    let mut long_value: Vec<i32> = Vec::with_capacity(capacity);

    for variable in RISK_VARIABLES {
        let values = column_as_i32(df, variable)?;
        for (&outcome, value) in cardio.iter().zip(values) {
            long_cardio.push(outcome);
            long_variable.push(variable);
            long_value.push(value);
        }
    }

    df! {
        "cardio" => long_cardio,
        "variable" => long_variable,
        "value" => long_value,
    }
    .context("Failed to unpivot risk factor columns")
}

/// Count records per (cardio, variable, value).
///
/// The long table is grouped in polars; the result is then laid over the
/// full grid cardio {0,1} x variables x value {0,1} with explicit zero
/// totals, so a binary dataset gives exactly 24 rows. Codes outside {0,1}
/// are counted too and sorted into place.
pub fn count_risk_factors(df: &DataFrame) -> Result<CategoryCounts> {
    let grouped = unpivot_risk_factors(df)?
        .lazy()
        .group_by([col("cardio"), col("variable"), col("value")])
        .agg([len().alias("total")])
        .collect()
        .context("Failed to count risk factor combinations")?;

    let cardio = column_as_i32(&grouped, "cardio")?;
    let value = column_as_i32(&grouped, "value")?;
    let total = column_as_i32(&grouped, "total")?;
    let variable = grouped.column("variable")?.str()?;

    // Keyed by variable index so ordering follows RISK_VARIABLES
    let mut totals: BTreeMap<(i32, usize, i32), u32> = BTreeMap::new();
    for &outcome in &BINARY_CODES {
        for idx in 0..RISK_VARIABLES.len() {
            for &code in &BINARY_CODES {
                totals.insert((outcome, idx, code), 0);
            }
        }
    }

    for (((outcome, name), code), count) in cardio
        .iter()
        .zip(variable.into_iter())
        .zip(value.iter())
        .zip(total.iter())
    {
        let name = name.context("Unpivoted variable name is missing")?;
        let idx = RISK_VARIABLES
            .iter()
            .position(|v| *v == name)
            .with_context(|| format!("Unexpected risk variable '{}'", name))?;
        totals.insert((*outcome, idx, *code), *count as u32);
    }

    let rows = totals
        .into_iter()
        .map(|((cardio, idx, value), total)| CategoryCount {
            cardio,
            variable: RISK_VARIABLES[idx].to_string(),
            value,
            total,
        })
        .collect();

    Ok(CategoryCounts { rows })
}
