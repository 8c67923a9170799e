//! Pairwise Pearson correlation matrix and its display mask

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;
use serde::Serialize;

use super::loader::column_as_f64;
use super::stats::pearson_correlation;

/// Square correlation matrix indexed by column name
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Mat<f64>,
}

impl CorrelationMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[(i, j)]
    }

    /// Correlation between two named columns
    pub fn get_by_name(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.get(i, j))
    }

    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.len()).map(|j| self.get(i, j)).collect()
    }

    /// Whether `m[i][j] == m[j][i]` within `tolerance` (NaN pairs match)
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self.get(i, j), self.get(j, i));
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }

    /// Mask hiding the upper triangle, diagonal included
    pub fn upper_triangle_mask(&self) -> TriangleMask {
        TriangleMask::upper(self.len())
    }
}

/// Boolean mask over a square matrix; `true` cells are suppressed from display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriangleMask {
    size: usize,
    cells: Vec<bool>,
}

impl TriangleMask {
    /// `true` for every `(i, j)` with `i <= j`
    pub fn upper(size: usize) -> Self {
        let cells = (0..size)
            .flat_map(|i| (0..size).map(move |j| i <= j))
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.size + j]
    }

    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.size.max(1)).map(|r| r.to_vec()).collect()
    }
}

/// Names of all primitive numeric columns, in table order
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}

/// Compute the full Pearson correlation matrix over every numeric column.
///
/// Only the upper triangle is computed and mirrored. Diagonal entries are
/// exactly 1.0, or NaN for a column with zero variance.
pub fn compute_correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let columns = numeric_columns(df);
    if columns.is_empty() {
        anyhow::bail!("No numeric columns available for correlation");
    }

    let data: Vec<Vec<f64>> = columns
        .iter()
        .map(|name| column_as_f64(df, name))
        .collect::<Result<_>>()?;

    let n = columns.len();
    let mut values = Mat::<f64>::zeros(n, n);

    for i in 0..n {
        for j in i..n {
            let corr = pearson_correlation(&data[i], &data[j]);
            let corr = if i == j && !corr.is_nan() { 1.0 } else { corr };
            values[(i, j)] = corr;
            values[(j, i)] = corr;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}
