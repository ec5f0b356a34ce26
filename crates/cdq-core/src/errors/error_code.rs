//! CdqErrorCode trait for machine-readable error classification.

/// Every error enum implements this to expose a stable code string
/// that callers can dispatch on without matching message text.
pub trait CdqErrorCode {
    /// Returns the error code string (e.g., "SCHEMA_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const USAGE_ERROR: &str = "USAGE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
