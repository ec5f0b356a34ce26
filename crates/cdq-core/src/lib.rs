//! # cdq-core
//!
//! Shared vocabulary for the cdq reporting-quality engine: errors,
//! configuration, tracing setup, constants, and the in-memory dataset
//! and catalog types the analysis crate consumes.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::CdqConfig;
pub use errors::{AnalysisError, CdqErrorCode, ConfigError, SchemaError, UsageError};
pub use types::{AdminColumns, AdminLevel, Dataset, IndicatorCatalog, Record};
