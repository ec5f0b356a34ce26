//! In-memory indicator dataset.
//!
//! A `Dataset` is the engine's only input: ordered administrative columns,
//! ordered indicator columns, and one `Record` per raw submission.
//! (admin path, year, month) need not be unique.

use serde::{Deserialize, Serialize};

use super::collections::FxHashSet;
use crate::errors::SchemaError;

/// One row of the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Administrative identifiers, aligned with `Dataset::admin_columns`.
    pub admin: Vec<String>,
    pub year: i32,
    /// 1–12.
    pub month: u32,
    /// Indicator values, aligned with `Dataset::indicator_columns`.
    /// `None` (or NaN) is missing.
    pub values: Vec<Option<f64>>,
}

/// Tabular dataset of facility indicator submissions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    admin_columns: Vec<String>,
    indicator_columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset with the given column layout.
    pub fn new<A, I>(admin_columns: A, indicator_columns: I) -> Result<Self, SchemaError>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let admin_columns: Vec<String> = admin_columns.into_iter().map(Into::into).collect();
        let indicator_columns: Vec<String> =
            indicator_columns.into_iter().map(Into::into).collect();

        let mut seen = FxHashSet::default();
        for name in admin_columns.iter().chain(indicator_columns.iter()) {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            admin_columns,
            indicator_columns,
            records: Vec::new(),
        })
    }

    /// Append a record after checking its shape against the column layout.
    pub fn push(&mut self, record: Record) -> Result<(), SchemaError> {
        self.check_record(&record)?;
        self.records.push(record);
        Ok(())
    }

    fn check_record(&self, record: &Record) -> Result<(), SchemaError> {
        if record.admin.len() != self.admin_columns.len() {
            return Err(SchemaError::RowShape {
                kind: "administrative",
                expected: self.admin_columns.len(),
                found: record.admin.len(),
            });
        }
        if record.values.len() != self.indicator_columns.len() {
            return Err(SchemaError::RowShape {
                kind: "indicator",
                expected: self.indicator_columns.len(),
                found: record.values.len(),
            });
        }
        if !(1..=12).contains(&record.month) {
            return Err(SchemaError::InvalidMonth {
                month: record.month,
            });
        }
        Ok(())
    }

    /// Convenience wrapper over `push` for literal rows.
    pub fn push_row(
        &mut self,
        admin: &[&str],
        year: i32,
        month: u32,
        values: &[Option<f64>],
    ) -> Result<(), SchemaError> {
        self.push(Record {
            admin: admin.iter().map(|s| s.to_string()).collect(),
            year,
            month,
            values: values.to_vec(),
        })
    }

    pub fn admin_columns(&self) -> &[String] {
        &self.admin_columns
    }

    pub fn indicator_columns(&self) -> &[String] {
        &self.indicator_columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn admin_index(&self, column: &str) -> Option<usize> {
        self.admin_columns.iter().position(|c| c == column)
    }

    pub fn indicator_index(&self, column: &str) -> Option<usize> {
        self.indicator_columns.iter().position(|c| c == column)
    }

    /// Smallest and largest year present, if any.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Fail fast unless every required administrative column and every
    /// requested indicator column is present. Lists all missing columns.
    ///
    /// Records are re-checked as well: a deserialized dataset never went
    /// through `push`.
    pub fn validate(&self, admin: &[&str], indicators: &[&str]) -> Result<(), SchemaError> {
        if indicators.is_empty() {
            return Err(SchemaError::EmptyIndicatorSet);
        }
        let mut missing: Vec<String> = admin
            .iter()
            .filter(|c| self.admin_index(c).is_none())
            .map(|c| c.to_string())
            .collect();
        missing.extend(
            indicators
                .iter()
                .filter(|c| self.indicator_index(c).is_none())
                .map(|c| c.to_string()),
        );
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns { columns: missing });
        }
        self.records.iter().try_for_each(|r| self.check_record(r))
    }
}

/// A value is present when it is `Some` and not NaN.
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}
