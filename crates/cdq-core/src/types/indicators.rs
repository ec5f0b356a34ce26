//! Indicator catalog: the ordered set of tracked indicators and their groups.

use serde::{Deserialize, Serialize};

use super::collections::{BTreeMap, FxHashSet};
use crate::constants::DEFAULT_IN_PATIENT_GROUP;
use crate::errors::{ConfigError, UsageError};

/// Ordered indicator names plus a named grouping of them.
///
/// The group named by `in_patient_group` is excluded from the
/// `mean_out_four` composite; every other indicator is a tracer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    indicators: Vec<String>,
    groups: BTreeMap<String, Vec<String>>,
    in_patient_group: String,
}

impl IndicatorCatalog {
    /// Build a catalog, checking that names are unique and non-empty and
    /// that every group member is a catalog indicator.
    pub fn new(
        indicators: Vec<String>,
        groups: BTreeMap<String, Vec<String>>,
        in_patient_group: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let in_patient_group = in_patient_group.into();
        let mut seen = FxHashSet::default();
        for name in &indicators {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "catalog.indicators".to_string(),
                    message: "indicator names must be non-empty".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "catalog.indicators".to_string(),
                    message: format!("duplicate indicator '{name}'"),
                });
            }
        }
        for (group, members) in &groups {
            if let Some(unknown) = members.iter().find(|m| !seen.contains(m.as_str())) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("catalog.groups.{group}"),
                    message: format!("'{unknown}' is not a catalog indicator"),
                });
            }
        }
        if !groups.contains_key(&in_patient_group) {
            return Err(ConfigError::ValidationFailed {
                field: "catalog.in_patient_group".to_string(),
                message: format!("group '{in_patient_group}' is not defined"),
            });
        }
        Ok(Self {
            indicators,
            groups,
            in_patient_group,
        })
    }

    /// All indicators, in canonical order.
    pub fn all(&self) -> &[String] {
        &self.indicators
    }

    pub fn groups(&self) -> &BTreeMap<String, Vec<String>> {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn in_patient_group(&self) -> &str {
        &self.in_patient_group
    }

    /// Members of the in-patient group.
    pub fn in_patient(&self) -> &[String] {
        self.group(&self.in_patient_group).unwrap_or(&[])
    }

    pub fn is_in_patient(&self, indicator: &str) -> bool {
        self.in_patient().iter().any(|i| i == indicator)
    }

    /// Indicators outside the in-patient group, in canonical order.
    pub fn tracers(&self) -> Vec<&str> {
        self.indicators
            .iter()
            .map(String::as_str)
            .filter(|i| !self.is_in_patient(i))
            .collect()
    }

    pub fn contains(&self, indicator: &str) -> bool {
        self.indicators.iter().any(|i| i == indicator)
    }

    /// Fail with `UnknownIndicator` unless `indicator` is in the catalog.
    pub fn require(&self, indicator: &str) -> Result<(), UsageError> {
        if self.contains(indicator) {
            Ok(())
        } else {
            Err(UsageError::UnknownIndicator {
                name: indicator.to_string(),
                allowed: self.indicators.clone(),
            })
        }
    }
}

impl Default for IndicatorCatalog {
    fn default() -> Self {
        let names = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut groups = BTreeMap::new();
        groups.insert("anc".to_string(), names(&["anc1"]));
        groups.insert("idelv".to_string(), names(&["idelv"]));
        groups.insert(
            "vacc".to_string(),
            names(&["penta1", "penta3", "measles1", "bcg"]),
        );
        groups.insert(DEFAULT_IN_PATIENT_GROUP.to_string(), names(&["opd", "ipd"]));
        Self {
            indicators: names(&[
                "anc1", "idelv", "penta1", "penta3", "measles1", "bcg", "opd", "ipd",
            ]),
            groups,
            in_patient_group: DEFAULT_IN_PATIENT_GROUP.to_string(),
        }
    }
}
