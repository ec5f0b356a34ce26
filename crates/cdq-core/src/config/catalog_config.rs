//! Indicator catalog and administrative column configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ADMINLEVEL_1_COLUMN, DEFAULT_DISTRICT_COLUMN, DEFAULT_IN_PATIENT_GROUP,
};
use crate::errors::ConfigError;
use crate::types::{AdminColumns, IndicatorCatalog};

/// Overrides for the indicator catalog and admin column names.
/// Unset fields fall back to the built-in catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Ordered indicator names. Empty means the built-in list.
    pub indicators: Vec<String>,
    /// Named indicator groups. Empty means the built-in groups.
    pub groups: BTreeMap<String, Vec<String>>,
    /// Group excluded from the `mean_out_four` composite. Default: "ipd".
    pub in_patient_group: Option<String>,
    /// Column identifying the first administrative level. Default: "area".
    pub adminlevel_1_column: Option<String>,
    /// Column identifying the district. Default: "district".
    pub district_column: Option<String>,
}

impl CatalogConfig {
    pub fn effective_in_patient_group(&self) -> &str {
        self.in_patient_group
            .as_deref()
            .unwrap_or(DEFAULT_IN_PATIENT_GROUP)
    }

    pub fn admin_columns(&self) -> AdminColumns {
        AdminColumns::new(
            self.adminlevel_1_column
                .as_deref()
                .unwrap_or(DEFAULT_ADMINLEVEL_1_COLUMN),
            self.district_column
                .as_deref()
                .unwrap_or(DEFAULT_DISTRICT_COLUMN),
        )
    }

    /// Resolve into a validated catalog.
    pub fn catalog(&self) -> Result<IndicatorCatalog, ConfigError> {
        if self.indicators.is_empty() && self.groups.is_empty() && self.in_patient_group.is_none()
        {
            return Ok(IndicatorCatalog::default());
        }
        let defaults = IndicatorCatalog::default();
        let indicators = if self.indicators.is_empty() {
            defaults.all().to_vec()
        } else {
            self.indicators.clone()
        };
        let groups = if self.groups.is_empty() {
            defaults.groups().clone()
        } else {
            self.groups.clone()
        };
        IndicatorCatalog::new(indicators, groups, self.effective_in_patient_group())
    }
}
