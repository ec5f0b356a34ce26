//! Usage errors: an argument is outside its enumerated set of allowed values.

use super::error_code::{self, CdqErrorCode};

/// Errors raised for invalid caller arguments. Messages always name the
/// values that would have been accepted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UsageError {
    #[error("Invalid admin_level '{value}'; expected one of: {}", allowed.join(", "))]
    InvalidAdminLevel { value: String, allowed: Vec<String> },

    #[error("admin_level '{level}' is not supported by {operation}; expected one of: {}", allowed.join(", "))]
    UnsupportedAdminLevel {
        level: String,
        operation: &'static str,
        allowed: Vec<String>,
    },

    #[error("Unknown indicator '{name}'; expected one of: {}", allowed.join(", "))]
    UnknownIndicator { name: String, allowed: Vec<String> },
}

impl CdqErrorCode for UsageError {
    fn error_code(&self) -> &'static str {
        error_code::USAGE_ERROR
    }
}
