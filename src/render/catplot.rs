//! Grouped bar chart of risk-factor counts, one facet per outcome

use std::path::Path;

use plotters::prelude::*;

use super::RenderError;
use crate::pipeline::CategoryCounts;

/// Style directives for the categorical bar chart
#[derive(Debug, Clone)]
pub struct CatPlotStyle {
    /// Caption prefix of each facet (`cardio = 0`, `cardio = 1`)
    pub facet_label: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend prefix for the bar colour split
    pub hue_label: String,
    /// Pixel size of a single facet
    pub facet_size: (u32, u32),
    /// Share of each variable slot covered by its bar group
    pub group_width: f64,
    pub palette: Vec<RGBColor>,
    /// Draw captions, axis labels and the legend (needs system fonts)
    pub show_labels: bool,
}

impl Default for CatPlotStyle {
    fn default() -> Self {
        Self {
            facet_label: "cardio".to_string(),
            x_label: "variable".to_string(),
            y_label: "total".to_string(),
            hue_label: "value".to_string(),
            facet_size: (600, 500),
            group_width: 0.8,
            palette: vec![RGBColor(31, 119, 180), RGBColor(255, 127, 14)],
            show_labels: true,
        }
    }
}

/// Label for an x position that falls on a variable slot, empty otherwise
fn variable_label(variables: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    variables.get(rounded as usize).cloned().unwrap_or_default()
}

/// Draw the count table as side-by-side facets of grouped bars and save it as PNG.
///
/// Facets follow the outcome codes, x slots follow the variable order of the
/// table, and each risk value gets its own bar colour.
pub fn draw_cat_plot(
    counts: &CategoryCounts,
    path: &Path,
    style: &CatPlotStyle,
) -> Result<(), RenderError> {
    let facets = counts.cardio_values();
    let variables = counts.variables();
    let hues = counts.values();
    if facets.is_empty() || variables.is_empty() || style.palette.is_empty() {
        return Err(RenderError::EmptyInput(path.display().to_string()));
    }

    let (facet_width, facet_height) = style.facet_size;
    let root = BitMapBackend::new(path, (facet_width * facets.len() as u32, facet_height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(|e| RenderError::drawing(path, e))?;

    let panels = root.split_evenly((1, facets.len()));
    let y_max = (counts.max_total() as f64 * 1.1).max(1.0);
    let x_range = -0.5f64..(variables.len() as f64 - 0.5);
    let bar_width = style.group_width / hues.len() as f64;

    for (panel, &cardio) in panels.iter().zip(facets.iter()) {
        let mut builder = ChartBuilder::on(panel);
        builder.margin(10);
        if style.show_labels {
            builder
                .caption(
                    format!("{} = {}", style.facet_label, cardio),
                    ("sans-serif", 20),
                )
                .x_label_area_size(40)
                .y_label_area_size(60);
        }
        let mut chart = builder
            .build_cartesian_2d(x_range.clone(), 0f64..y_max)
            .map_err(|e| RenderError::drawing(path, e))?;

        if style.show_labels {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(variables.len())
                .x_label_formatter(&|x| variable_label(&variables, *x))
                .y_label_formatter(&|y| format!("{:.0}", y))
                .x_desc(style.x_label.as_str())
                .y_desc(style.y_label.as_str())
                .draw()
                .map_err(|e| RenderError::drawing(path, e))?;
        }

        for (h, &value) in hues.iter().enumerate() {
            let color = style.palette[h % style.palette.len()];
            let offset = -style.group_width / 2.0 + h as f64 * bar_width;

            chart
                .draw_series(variables.iter().enumerate().map(|(i, variable)| {
                    let total = counts.total_for(cardio, variable, value) as f64;
                    let x0 = i as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + bar_width, total)], color.filled())
                }))
                .map_err(|e| RenderError::drawing(path, e))?
                .label(format!("{} = {}", style.hue_label, value))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        if style.show_labels {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(|e| RenderError::drawing(path, e))?;
        }
    }

    root.present().map_err(|e| RenderError::drawing(path, e))?;
    Ok(())
}
