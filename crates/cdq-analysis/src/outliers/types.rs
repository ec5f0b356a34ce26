//! Core types for outlier detection output.

use serde::Serialize;

use cdq_core::constants::{FLAG_SUFFIX, MAD_SUFFIX, MEDIAN_SUFFIX};
use cdq_core::types::collections::{AdminPath, FxHashMap};
use cdq_core::{AdminLevel, IndicatorCatalog};

/// Administrative path plus period. `month` is `None` for annual keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub admin: AdminPath,
    pub year: i32,
    pub month: Option<u32>,
}

impl GroupKey {
    pub fn monthly(admin: AdminPath, year: i32, month: u32) -> Self {
        Self {
            admin,
            year,
            month: Some(month),
        }
    }

    pub fn annual(admin: AdminPath, year: i32) -> Self {
        Self {
            admin,
            year,
            month: None,
        }
    }
}

/// Index of an indicator within an `IndicatorRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct IndicatorHandle(usize);

impl IndicatorHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Output column names for one indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorColumns {
    pub name: String,
    pub median: String,
    pub mad: String,
    pub flag: String,
    pub in_patient: bool,
}

impl IndicatorColumns {
    pub fn new(name: &str, in_patient: bool) -> Self {
        Self {
            name: name.to_string(),
            median: format!("{name}{MEDIAN_SUFFIX}"),
            mad: format!("{name}{MAD_SUFFIX}"),
            flag: format!("{name}{FLAG_SUFFIX}"),
            in_patient,
        }
    }
}

/// Indicator name → column handles, built once per call.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorRegistry {
    columns: Vec<IndicatorColumns>,
    #[serde(skip)]
    by_name: FxHashMap<String, IndicatorHandle>,
}

impl IndicatorRegistry {
    /// Register `names` in order, tagging in-patient membership from `catalog`.
    pub fn build(names: &[&str], catalog: &IndicatorCatalog) -> Self {
        let mut columns = Vec::with_capacity(names.len());
        let mut by_name = FxHashMap::default();
        for name in names {
            if by_name.contains_key(*name) {
                continue;
            }
            by_name.insert(name.to_string(), IndicatorHandle(columns.len()));
            columns.push(IndicatorColumns::new(name, catalog.is_in_patient(name)));
        }
        Self { columns, by_name }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn handle(&self, name: &str) -> Option<IndicatorHandle> {
        self.by_name.get(name).copied()
    }

    pub fn columns(&self, handle: IndicatorHandle) -> &IndicatorColumns {
        &self.columns[handle.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorHandle, &IndicatorColumns)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| (IndicatorHandle(i), c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Handles of indicators outside the in-patient group.
    pub fn tracer_handles(&self) -> Vec<IndicatorHandle> {
        self.iter()
            .filter(|(_, c)| !c.in_patient)
            .map(|(h, _)| h)
            .collect()
    }
}

/// Robust statistics and outlier flag for one indicator in one monthly row.
///
/// `flag` is `Some(1)` for an extreme outlier, `Some(0)` otherwise, and
/// `None` when the value is missing or the group MAD is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct IndicatorStats {
    pub value: Option<f64>,
    pub median: Option<f64>,
    pub mad: Option<f64>,
    pub flag: Option<u8>,
}

impl IndicatorStats {
    pub fn flag_f64(&self) -> Option<f64> {
        self.flag.map(f64::from)
    }
}

/// One (unit, year, month) row of OutlierCore output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierRow {
    pub key: GroupKey,
    /// Aligned with the owning table's registry.
    pub stats: Vec<IndicatorStats>,
}

impl OutlierRow {
    pub fn stat(&self, handle: IndicatorHandle) -> &IndicatorStats {
        &self.stats[handle.index()]
    }
}

/// Record-level outlier table at one administrative granularity.
#[derive(Debug, Clone, Serialize)]
pub struct OutlierTable {
    pub level: AdminLevel,
    pub admin_columns: Vec<String>,
    pub registry: IndicatorRegistry,
    /// Sorted by (admin path, year, month).
    pub rows: Vec<OutlierRow>,
}

impl OutlierTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows flagged as extreme outliers for `indicator`.
    pub fn outlier_count(&self, indicator: &str) -> usize {
        match self.registry.handle(indicator) {
            Some(h) => self
                .rows
                .iter()
                .filter(|r| r.stat(h).flag == Some(1))
                .count(),
            None => 0,
        }
    }

    /// Years present in the table, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.rows.iter().map(|r| r.key.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
