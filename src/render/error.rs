//! Error types for chart rendering.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while drawing a chart to disk.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The plotting backend failed to draw or write the image.
    #[error("Failed to draw chart {path}: {message}")]
    Drawing {
        /// Output image path
        path: String,
        /// Backend error message
        message: String,
    },

    /// There is no data to draw.
    #[error("Nothing to render for {0}")]
    EmptyInput(String),

    /// Matrix and mask disagree in size.
    #[error("Mask is {mask}x{mask} but matrix is {matrix}x{matrix}")]
    ShapeMismatch {
        /// Matrix dimension
        matrix: usize,
        /// Mask dimension
        mask: usize,
    },
}

impl RenderError {
    pub(crate) fn drawing(path: &Path, err: impl fmt::Display) -> Self {
        RenderError::Drawing {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
