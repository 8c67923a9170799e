//! Medviz: Medical Examination Visualizer CLI
//!
//! Loads examination records, derives binary risk features, and renders a
//! grouped bar chart of risk factors by outcome plus a correlation heat map.

mod cli;
mod pipeline;
mod render;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::Cli;
use pipeline::{
    count_risk_factors, derive_features, estimated_memory_mb, load_dataset, prepare_heat_map,
    validate_quantiles,
};
use render::{draw_cat_plot, draw_heat_map, CatPlotStyle, HeatMapStyle};
use report::{export_json, print_category_counts, ExportParams, RunSummary};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    validate_quantiles(cli.lower_quantile, cli.upper_quantile)?;

    print_banner(env!("CARGO_PKG_VERSION"));

    let plot_paths = cli.plot_paths();
    let mut outputs: Vec<&std::path::Path> = plot_paths.iter().map(|p| p.as_path()).collect();
    if let Some(export) = &cli.export {
        outputs.push(export.as_path());
    }
    print_config(
        &cli.input,
        &outputs,
        cli.bmi_threshold,
        cli.lower_quantile,
        cli.upper_quantile,
    );

    // Step 1: Load and derive features
    print_step_header(1, "Load Examination Records");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let raw = load_dataset(&cli.input, cli.infer_schema_length)?;
    let df = derive_features(&raw, cli.bmi_threshold)?;
    finish_with_success(&spinner, "Dataset loaded and features derived");

    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", estimated_memory_mb(&df));

    let mut summary = RunSummary::new(rows);
    let load_elapsed = step_start.elapsed();
    summary.add_timing("Load", load_elapsed);
    print_step_time(load_elapsed);

    // Step 2: Risk factor counts and bar chart
    print_step_header(2, "Risk Factors by Outcome");

    let step_start = Instant::now();
    let counts = count_risk_factors(&df)?;
    print_count("count rows", counts.len(), Some("(cardio x variable x value)"));
    print_category_counts(&counts);

    if cli.no_plots {
        print_info("Chart rendering skipped");
    } else {
        let spinner = create_spinner("Drawing bar chart...");
        draw_cat_plot(&counts, &cli.catplot_output, &CatPlotStyle::default())?;
        finish_with_success(
            &spinner,
            &format!("Saved to {}", cli.catplot_output.display()),
        );
        summary.add_output(cli.catplot_output.clone());
    }
    let cat_elapsed = step_start.elapsed();
    summary.add_timing("Bar chart", cat_elapsed);
    print_step_time(cat_elapsed);

    // Step 3: Outlier filter, correlation matrix and heat map
    print_step_header(3, "Correlation Heat Map");

    let step_start = Instant::now();
    let spinner = create_spinner("Filtering outliers and computing correlations...");
    let heat_map = prepare_heat_map(&df, cli.lower_quantile, cli.upper_quantile)?;
    if heat_map.retained_rows < 2 {
        finish_with_warning(
            &spinner,
            "Fewer than two records left after filtering; correlations are undefined",
        );
    } else {
        finish_with_success(&spinner, "Correlation matrix computed");
    }
    print_count(
        "record(s) kept",
        heat_map.retained_rows,
        Some(&format!("of {}", rows)),
    );
    summary.set_heat_map(heat_map.bounds, heat_map.retained_rows, heat_map.matrix.len());

    if !cli.no_plots {
        let spinner = create_spinner("Drawing heat map...");
        draw_heat_map(
            &heat_map.matrix,
            &heat_map.mask,
            &cli.heatmap_output,
            &HeatMapStyle::default(),
        )?;
        finish_with_success(
            &spinner,
            &format!("Saved to {}", cli.heatmap_output.display()),
        );
        summary.add_output(cli.heatmap_output.clone());
    }
    let heat_elapsed = step_start.elapsed();
    summary.add_timing("Heat map", heat_elapsed);
    print_step_time(heat_elapsed);

    // Optional export
    if let Some(export_path) = &cli.export {
        let input_file = cli.input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            bmi_threshold: cli.bmi_threshold,
            lower_quantile: cli.lower_quantile,
            upper_quantile: cli.upper_quantile,
        };
        export_json(counts.rows(), &heat_map, export_path, &params)?;
        print_success(&format!("Exported data to {}", export_path.display()));
        summary.add_output(export_path.clone());
    }

    summary.display();
    print_completion();

    Ok(())
}
