//! Error handling for cdq.
//! One error enum per concern, `thiserror` only.

pub mod analysis_error;
pub mod config_error;
pub mod error_code;
pub mod schema_error;
pub mod usage_error;

pub use analysis_error::AnalysisError;
pub use config_error::ConfigError;
pub use error_code::CdqErrorCode;
pub use schema_error::SchemaError;
pub use usage_error::UsageError;
