//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Medviz - Chart risk factors and correlations in medical examination data
#[derive(Parser, Debug)]
#[command(name = "medviz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = "medical_examination.csv")]
    pub input: PathBuf,

    /// Output path of the grouped bar chart (PNG, overwritten if present)
    #[arg(long, default_value = "catplot.png")]
    pub catplot_output: PathBuf,

    /// Output path of the correlation heat map (PNG, overwritten if present)
    #[arg(long, default_value = "heatmap.png")]
    pub heatmap_output: PathBuf,

    /// BMI above which a record is flagged as overweight
    #[arg(long, default_value = "25.0")]
    pub bmi_threshold: f64,

    /// Lower quantile for the height/weight outlier filter (0.0 to 1.0)
    #[arg(long, default_value = "0.025", value_parser = validate_quantile)]
    pub lower_quantile: f64,

    /// Upper quantile for the height/weight outlier filter (0.0 to 1.0)
    #[arg(long, default_value = "0.975", value_parser = validate_quantile)]
    pub upper_quantile: f64,

    /// Write the count table, outlier bounds and correlation matrix to this JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Skip chart rendering (counts, matrix and export still run)
    #[arg(long, default_value = "false")]
    pub no_plots: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Chart files this run writes, in rendering order
    pub fn plot_paths(&self) -> Vec<PathBuf> {
        if self.no_plots {
            Vec::new()
        } else {
            vec![self.catplot_output.clone(), self.heatmap_output.clone()]
        }
    }
}

/// Validator for quantile parameters
fn validate_quantile(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!("quantile must be between 0.0 and 1.0, got {}", value))
    } else {
        Ok(value)
    }
}
