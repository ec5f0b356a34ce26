//! Core data types consumed by the analysis engine.

pub mod admin;
pub mod collections;
pub mod dataset;
pub mod indicators;

pub use admin::{AdminColumns, AdminLevel};
pub use dataset::{Dataset, Record};
pub use indicators::IndicatorCatalog;
