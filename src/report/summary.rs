//! Run summary and count table display

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{CategoryCounts, OutlierBounds};
use crate::utils::format_duration;

/// Summary of one visualization run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub records_loaded: usize,
    pub records_retained: usize,
    pub bounds: Option<OutlierBounds>,
    pub matrix_size: usize,
    pub outputs: Vec<PathBuf>,
    pub timings: Vec<(String, Duration)>,
}

impl RunSummary {
    pub fn new(records_loaded: usize) -> Self {
        Self {
            records_loaded,
            ..Default::default()
        }
    }

    pub fn set_heat_map(&mut self, bounds: OutlierBounds, retained: usize, matrix_size: usize) {
        self.bounds = Some(bounds);
        self.records_retained = retained;
        self.matrix_size = matrix_size;
    }

    pub fn add_output(&mut self, path: PathBuf) {
        self.outputs.push(path);
    }

    pub fn add_timing(&mut self, step: &str, elapsed: Duration) {
        self.timings.push((step.to_string(), elapsed));
    }

    /// Share of loaded records removed by the outlier filter, in percent
    pub fn removed_pct(&self) -> f64 {
        if self.records_loaded == 0 {
            return 0.0;
        }
        let removed = self.records_loaded.saturating_sub(self.records_retained);
        removed as f64 / self.records_loaded as f64 * 100.0
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Records Loaded"),
            Cell::new(self.records_loaded),
        ]);

        let pct = self.removed_pct();
        table.add_row(vec![
            Cell::new("🧹 Records Kept (Heat Map)"),
            Cell::new(format!("{} (-{:.1}%)", self.records_retained, pct)).fg(if pct > 10.0 {
                Color::Yellow
            } else {
                Color::Green
            }),
        ]);

        if let Some(bounds) = &self.bounds {
            table.add_row(vec![
                Cell::new("📏 Height Window"),
                Cell::new(format!("{:.1} .. {:.1}", bounds.height.low, bounds.height.high)),
            ]);
            table.add_row(vec![
                Cell::new("⚖️  Weight Window"),
                Cell::new(format!("{:.1} .. {:.1}", bounds.weight.low, bounds.weight.high)),
            ]);
        }

        table.add_row(vec![
            Cell::new("🔗 Correlation Matrix"),
            Cell::new(format!("{0} x {0}", self.matrix_size)),
        ]);

        for output in &self.outputs {
            table.add_row(vec![
                Cell::new("💾 Written"),
                Cell::new(output.display())
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }

        for (step, elapsed) in &self.timings {
            table.add_row(vec![
                Cell::new(format!("⏱  {}", step)),
                Cell::new(format_duration(*elapsed)).fg(Color::Cyan),
            ]);
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Build the long-form count table for terminal display
pub fn category_counts_table(counts: &CategoryCounts) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("cardio").add_attribute(Attribute::Bold),
        Cell::new("variable").add_attribute(Attribute::Bold),
        Cell::new("value").add_attribute(Attribute::Bold),
        Cell::new("total").add_attribute(Attribute::Bold),
    ]);

    for row in counts.rows() {
        table.add_row(vec![
            Cell::new(row.cardio),
            Cell::new(&row.variable),
            Cell::new(row.value),
            Cell::new(row.total)
                .set_alignment(CellAlignment::Right)
                .fg(if row.total == 0 { Color::DarkGrey } else { Color::White }),
        ]);
    }

    table
}

/// Print the long-form count table
pub fn print_category_counts(counts: &CategoryCounts) {
    for line in category_counts_table(counts).to_string().lines() {
        println!("      {}", line);
    }
}
