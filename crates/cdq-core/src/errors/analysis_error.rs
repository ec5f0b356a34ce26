//! Top-level error for engine entry points.

use super::error_code::CdqErrorCode;
use super::{ConfigError, SchemaError, UsageError};

/// Errors returned by the public analysis entry points.
/// Aggregates the per-concern errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Usage error: {0}")]
    Usage(#[from] UsageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CdqErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.error_code(),
            Self::Usage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
