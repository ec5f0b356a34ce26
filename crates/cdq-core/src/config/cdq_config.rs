//! Top-level cdq configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CatalogConfig, OutlierConfig, StatsWindow};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "cdq.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`CDQ_*`)
/// 3. Project config (`cdq.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CdqConfig {
    pub outliers: OutlierConfig,
    pub catalog: CatalogConfig,
}

/// Caller-supplied overrides, the highest-priority layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mad_scale: Option<f64>,
    pub mad_multiple: Option<f64>,
    pub stats_window: Option<StatsWindow>,
    pub parallel: Option<bool>,
}

impl CdqConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &CdqConfig) -> Result<(), ConfigError> {
        if let Some(scale) = config.outliers.mad_scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "outliers.mad_scale".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        if let Some(multiple) = config.outliers.mad_multiple {
            if !(multiple.is_finite() && multiple > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "outliers.mad_multiple".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        config.catalog.catalog()?;
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut CdqConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: CdqConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(path = %path.display(), "merged project config");
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it is set.
    fn merge(base: &mut CdqConfig, other: &CdqConfig) {
        if other.outliers.mad_scale.is_some() {
            base.outliers.mad_scale = other.outliers.mad_scale;
        }
        if other.outliers.mad_multiple.is_some() {
            base.outliers.mad_multiple = other.outliers.mad_multiple;
        }
        if other.outliers.stats_window.is_some() {
            base.outliers.stats_window = other.outliers.stats_window;
        }
        if other.outliers.parallel.is_some() {
            base.outliers.parallel = other.outliers.parallel;
        }

        if !other.catalog.indicators.is_empty() {
            base.catalog.indicators = other.catalog.indicators.clone();
        }
        if !other.catalog.groups.is_empty() {
            base.catalog.groups = other.catalog.groups.clone();
        }
        if other.catalog.in_patient_group.is_some() {
            base.catalog.in_patient_group = other.catalog.in_patient_group.clone();
        }
        if other.catalog.adminlevel_1_column.is_some() {
            base.catalog.adminlevel_1_column = other.catalog.adminlevel_1_column.clone();
        }
        if other.catalog.district_column.is_some() {
            base.catalog.district_column = other.catalog.district_column.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CDQ_MAD_SCALE`, `CDQ_MAD_MULTIPLE`, `CDQ_STATS_WINDOW`, `CDQ_PARALLEL`.
    fn apply_env_overrides(config: &mut CdqConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_value::<f64>("CDQ_MAD_SCALE")? {
            config.outliers.mad_scale = Some(v);
        }
        if let Some(v) = env_value::<f64>("CDQ_MAD_MULTIPLE")? {
            config.outliers.mad_multiple = Some(v);
        }
        if let Some(v) = env_value::<StatsWindow>("CDQ_STATS_WINDOW")? {
            config.outliers.stats_window = Some(v);
        }
        if let Some(v) = env_value::<bool>("CDQ_PARALLEL")? {
            config.outliers.parallel = Some(v);
        }
        Ok(())
    }

    /// Apply caller overrides (highest priority).
    pub fn apply_overrides(config: &mut CdqConfig, overrides: &ConfigOverrides) {
        if overrides.mad_scale.is_some() {
            config.outliers.mad_scale = overrides.mad_scale;
        }
        if overrides.mad_multiple.is_some() {
            config.outliers.mad_multiple = overrides.mad_multiple;
        }
        if overrides.stats_window.is_some() {
            config.outliers.stats_window = overrides.stats_window;
        }
        if overrides.parallel.is_some() {
            config.outliers.parallel = overrides.parallel;
        }
    }
}

/// Read and parse an environment variable; unset is `None`, unparsable is an error.
fn env_value<T>(name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: name.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
