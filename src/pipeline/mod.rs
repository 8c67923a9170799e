//! Pipeline module - loading, feature derivation and the two reshaping paths

pub mod categorical;
pub mod correlation;
pub mod features;
pub mod heatmap;
pub mod loader;
pub mod stats;

pub use categorical::*;
pub use correlation::*;
pub use features::*;
pub use heatmap::*;
pub use loader::*;
pub use stats::*;
