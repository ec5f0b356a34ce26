//! Schema errors: the input dataset does not have the shape the engine needs.

use super::error_code::{self, CdqErrorCode};

/// Errors raised while validating a dataset, before any computation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Required columns missing from dataset: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Row has {found} {kind} values, dataset declares {expected}")]
    RowShape {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Month must be between 1 and 12, got {month}")]
    InvalidMonth { month: u32 },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("No indicators requested")]
    EmptyIndicatorSet,
}

impl CdqErrorCode for SchemaError {
    fn error_code(&self) -> &'static str {
        error_code::SCHEMA_ERROR
    }
}
