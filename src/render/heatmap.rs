//! Annotated correlation heat map with a masked upper triangle

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::RenderError;
use crate::pipeline::{CorrelationMatrix, TriangleMask};

/// Pixel width reserved for the colorbar on the right
const COLORBAR_WIDTH: u32 = 110;

/// Pixel size of the tick label areas around the grid
const LABEL_AREA: u32 = 90;

/// Number of strips drawn for the colorbar gradient
const COLORBAR_STEPS: usize = 100;

// Diverging palette endpoints (negative, centre, positive)
const NEGATIVE: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (247.0, 247.0, 247.0);
const POSITIVE: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Style directives for the heat map
#[derive(Debug, Clone)]
pub struct HeatMapStyle {
    /// Value mapped to the neutral colour
    pub center: f64,
    /// Write each visible value inside its cell
    pub annotate: bool,
    /// Decimal places of the annotations
    pub decimals: usize,
    /// Width of the white separators between cells
    pub line_width: f64,
    /// Force square cells
    pub square: bool,
    /// Colorbar height relative to the plot height
    pub colorbar_shrink: f64,
    pub size: (u32, u32),
    /// Draw tick labels, annotations and colorbar ticks (needs system fonts)
    pub show_labels: bool,
}

impl Default for HeatMapStyle {
    fn default() -> Self {
        Self {
            center: 0.0,
            annotate: true,
            decimals: 1,
            line_width: 0.5,
            square: true,
            colorbar_shrink: 0.5,
            size: (800, 700),
            show_labels: true,
        }
    }
}

/// Map `t` in [-1, 1] onto the diverging palette
pub fn diverging_color(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(-1.0, 1.0) };
    let (to, s) = if t < 0.0 { (NEGATIVE, -t) } else { (POSITIVE, t) };
    let lerp = |a: f64, b: f64| (a + (b - a) * s).round() as u8;
    RGBColor(
        lerp(NEUTRAL.0, to.0),
        lerp(NEUTRAL.1, to.1),
        lerp(NEUTRAL.2, to.2),
    )
}

/// Largest distance from `center` among visible finite cells (1.0 if none)
pub fn color_extent(matrix: &CorrelationMatrix, mask: &TriangleMask, center: f64) -> f64 {
    let n = matrix.len();
    let extent = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| !mask.is_masked(i, j))
        .map(|(i, j)| matrix.get(i, j))
        .filter(|v| v.is_finite())
        .map(|v| (v - center).abs())
        .fold(0.0f64, f64::max);

    if extent > 0.0 {
        extent
    } else {
        1.0
    }
}

fn cell_color(value: f64, center: f64, extent: f64) -> RGBColor {
    diverging_color((value - center) / extent)
}

/// Grid rectangle of cell (i, j); row 0 is drawn at the top
fn cell_bounds(i: usize, j: usize, n: usize) -> [(f64, f64); 2] {
    let x = j as f64;
    let y = (n - 1 - i) as f64;
    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)]
}

fn axis_label(columns: &[String], position: f64, flipped: bool) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    let n = columns.len();
    let idx = rounded as usize;
    if idx >= n {
        return String::new();
    }
    let idx = if flipped { n - 1 - idx } else { idx };
    columns[idx].clone()
}

/// Draw the correlation matrix as a heat map and save it as PNG.
///
/// Masked cells and NaN entries are left blank. Colours diverge around
/// `style.center` with a symmetric extent taken from the visible cells.
pub fn draw_heat_map(
    matrix: &CorrelationMatrix,
    mask: &TriangleMask,
    path: &Path,
    style: &HeatMapStyle,
) -> Result<(), RenderError> {
    let n = matrix.len();
    if n == 0 {
        return Err(RenderError::EmptyInput(path.display().to_string()));
    }
    if mask.size() != n {
        return Err(RenderError::ShapeMismatch {
            matrix: n,
            mask: mask.size(),
        });
    }

    let center = style.center;
    let extent = color_extent(matrix, mask, center);

    let (width, height) = style.size;
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| RenderError::drawing(path, e))?;

    let (plot_area, bar_area) =
        root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH) as i32);
    let plot_area = if style.square {
        let (w, h) = plot_area.dim_in_pixel();
        let side = w.min(h);
        plot_area.shrink((0i32, ((h - side) / 2) as i32), (side as i32, side as i32))
    } else {
        plot_area
    };

    let columns = matrix.columns();
    let axis_range = -0.5f64..(n as f64 - 0.5);
    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(10);
    if style.show_labels {
        builder
            .x_label_area_size(LABEL_AREA)
            .y_label_area_size(LABEL_AREA);
    }
    let mut chart = builder
        .build_cartesian_2d(axis_range.clone(), axis_range)
        .map_err(|e| RenderError::drawing(path, e))?;

    if style.show_labels {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|x| axis_label(columns, *x, false))
            .y_label_formatter(&|y| axis_label(columns, *y, true))
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_style(("sans-serif", 12))
            .draw()
            .map_err(|e| RenderError::drawing(path, e))?;
    }

    let visible: Vec<(usize, usize, f64)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| !mask.is_masked(i, j))
        .map(|(i, j)| (i, j, matrix.get(i, j)))
        .filter(|(_, _, v)| v.is_finite())
        .collect();

    chart
        .draw_series(visible.iter().map(|&(i, j, v)| {
            Rectangle::new(cell_bounds(i, j, n), cell_color(v, center, extent).filled())
        }))
        .map_err(|e| RenderError::drawing(path, e))?;

    let line_px = (style.line_width * 2.0).round() as u32;
    if line_px > 0 {
        chart
            .draw_series(visible.iter().map(|&(i, j, _)| {
                Rectangle::new(cell_bounds(i, j, n), WHITE.stroke_width(line_px))
            }))
            .map_err(|e| RenderError::drawing(path, e))?;
    }

    if style.annotate && style.show_labels {
        let decimals = style.decimals;
        chart
            .draw_series(visible.iter().map(|&(i, j, v)| {
                let ink = if ((v - center) / extent).abs() > 0.6 {
                    WHITE
                } else {
                    BLACK
                };
                Text::new(
                    format!("{:.*}", decimals, v),
                    (j as f64, (n - 1 - i) as f64),
                    ("sans-serif", 12)
                        .into_font()
                        .color(&ink)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                )
            }))
            .map_err(|e| RenderError::drawing(path, e))?;
    }

    // Colorbar, vertically centred and shrunk relative to the plot
    let (bar_w, bar_h) = bar_area.dim_in_pixel();
    let (_, plot_h) = plot_area.dim_in_pixel();
    let strip_h = ((plot_h as f64 * style.colorbar_shrink.clamp(0.05, 1.0)) as u32).min(bar_h);
    let bar_area = bar_area.shrink(
        (10i32, ((bar_h - strip_h) / 2) as i32),
        (bar_w.saturating_sub(20) as i32, strip_h as i32),
    );

    let mut bar_builder = ChartBuilder::on(&bar_area);
    bar_builder.margin(5);
    if style.show_labels {
        bar_builder.y_label_area_size(50);
    }
    let mut bar = bar_builder
        .build_cartesian_2d(0f64..1f64, (center - extent)..(center + extent))
        .map_err(|e| RenderError::drawing(path, e))?;

    if style.show_labels {
        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(5)
            .y_label_formatter(&|v| format!("{:.1}", v))
            .draw()
            .map_err(|e| RenderError::drawing(path, e))?;
    }

    let step = 2.0 * extent / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let lo = center - extent + k as f64 * step;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            cell_color(lo + step / 2.0, center, extent).filled(),
        )
    }))
    .map_err(|e| RenderError::drawing(path, e))?;

    root.present().map_err(|e| RenderError::drawing(path, e))?;
    Ok(())
}
