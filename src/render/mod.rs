//! Render module - PNG charts built with plotters

pub mod catplot;
mod error;
pub mod heatmap;

pub use catplot::*;
pub use error::RenderError;
pub use heatmap::*;
