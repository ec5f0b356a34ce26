//! Output artifacts returned to callers.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use cdq_core::constants::{MEAN_OUT_ALL_COLUMN, MEAN_OUT_FOUR_COLUMN, MONTH_COLUMN, YEAR_COLUMN};
use cdq_core::types::collections::AdminPath;
use cdq_core::AdminLevel;

use crate::outliers::types::{IndicatorColumns, IndicatorRegistry};

/// Artifact type tag, for consumers that dispatch on what they received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    AnnualOutlierSummary,
    DistrictOutlierSummary,
    OutlierUnitList,
}

impl ArtifactKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AnnualOutlierSummary => "annual_outlier_summary",
            Self::DistrictOutlierSummary => "district_outlier_summary",
            Self::OutlierUnitList => "outlier_unit_list",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata carried with every artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMetadata {
    pub admin_level: AdminLevel,
    /// Set for unit lists only.
    pub indicator: Option<String>,
}

/// One row of an annual or district summary. Rates are non-outlier
/// percentages; `None` means no evaluable observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub admin: AdminPath,
    pub year: i32,
    /// Aligned with the table's indicator registry.
    pub rates: Vec<Option<f64>>,
    pub mean_out_all: Option<f64>,
    pub mean_out_four: Option<f64>,
}

/// Annual per-unit summary or national-by-year district rollup.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryTable {
    pub kind: ArtifactKind,
    pub metadata: ArtifactMetadata,
    pub admin_columns: Vec<String>,
    pub registry: IndicatorRegistry,
    /// Sorted by (admin path, year).
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Admin columns, `year`, one `{indicator}_outlier5std` per indicator,
    /// `mean_out_all`, `mean_out_four`.
    pub fn column_names(&self) -> Vec<String> {
        let mut cols = self.admin_columns.clone();
        cols.push(YEAR_COLUMN.to_string());
        cols.extend(self.registry.iter().map(|(_, c)| c.flag.clone()));
        cols.push(MEAN_OUT_ALL_COLUMN.to_string());
        cols.push(MEAN_OUT_FOUR_COLUMN.to_string());
        cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-outlier percentage of `indicator` in `row`. `None` if the
    /// indicator is not in this table or the rate is missing.
    pub fn rate(&self, row: &SummaryRow, indicator: &str) -> Option<f64> {
        let h = self.registry.handle(indicator)?;
        row.rates.get(h.index()).copied().flatten()
    }

    pub fn rows_for_year(&self, year: i32) -> impl Iterator<Item = &SummaryRow> {
        self.rows.iter().filter(move |r| r.year == year)
    }

    /// Rows as JSON objects keyed by `column_names()`, in that order. Missing
    /// values are `null`.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (col, value) in self.admin_columns.iter().zip(row.admin.iter()) {
                    obj.insert(col.clone(), Value::from(value.as_str()));
                }
                obj.insert(YEAR_COLUMN.to_string(), Value::from(row.year));
                for ((_, cols), rate) in self.registry.iter().zip(row.rates.iter()) {
                    obj.insert(cols.flag.clone(), number(*rate));
                }
                obj.insert(MEAN_OUT_ALL_COLUMN.to_string(), number(row.mean_out_all));
                obj.insert(MEAN_OUT_FOUR_COLUMN.to_string(), number(row.mean_out_four));
                Value::Object(obj)
            })
            .collect();
        Value::Array(rows)
    }
}

/// One (unit, year, month) row of a unit list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitListRow {
    pub admin: AdminPath,
    pub year: i32,
    pub month: u32,
    pub value: Option<f64>,
    pub median: Option<f64>,
    pub mad: Option<f64>,
    /// Raw 0/1 flag, not a percentage.
    pub flag: Option<u8>,
}

/// Plot-ready projection of one indicator's outlier statistics.
#[derive(Debug, Clone, Serialize)]
pub struct UnitList {
    pub kind: ArtifactKind,
    pub metadata: ArtifactMetadata,
    pub admin_columns: Vec<String>,
    pub indicator: IndicatorColumns,
    /// Sorted by (admin path, year, month).
    pub rows: Vec<UnitListRow>,
}

impl UnitList {
    /// Admin columns, `year`, `month`, `{indicator}`, `{indicator}_med`,
    /// `{indicator}_mad`, `{indicator}_outlier5std`.
    pub fn column_names(&self) -> Vec<String> {
        let mut cols = self.admin_columns.clone();
        cols.push(YEAR_COLUMN.to_string());
        cols.push(MONTH_COLUMN.to_string());
        cols.push(self.indicator.name.clone());
        cols.push(self.indicator.median.clone());
        cols.push(self.indicator.mad.clone());
        cols.push(self.indicator.flag.clone());
        cols
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows flagged as extreme outliers.
    pub fn flagged(&self) -> impl Iterator<Item = &UnitListRow> {
        self.rows.iter().filter(|r| r.flag == Some(1))
    }

    /// Rows as JSON objects keyed by `column_names()`, in that order. Missing
    /// values are `null`.
    pub fn to_json(&self) -> Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                for (col, value) in self.admin_columns.iter().zip(row.admin.iter()) {
                    obj.insert(col.clone(), Value::from(value.as_str()));
                }
                obj.insert(YEAR_COLUMN.to_string(), Value::from(row.year));
                obj.insert(MONTH_COLUMN.to_string(), Value::from(row.month));
                obj.insert(self.indicator.name.clone(), number(row.value));
                obj.insert(self.indicator.median.clone(), number(row.median));
                obj.insert(self.indicator.mad.clone(), number(row.mad));
                obj.insert(
                    self.indicator.flag.clone(),
                    row.flag.map(Value::from).unwrap_or(Value::Null),
                );
                Value::Object(obj)
            })
            .collect();
        Value::Array(rows)
    }
}

fn number(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
