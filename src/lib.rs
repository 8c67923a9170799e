//! Medviz: Medical Examination Visualizer Library
//!
//! A library for reshaping medical examination records into
//! risk-factor counts and a filtered correlation matrix, and rendering both as charts.

pub mod cli;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod utils;
