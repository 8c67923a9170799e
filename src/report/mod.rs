//! Report module - run summary and data export

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
