//! Configuration system for cdq.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod catalog_config;
pub mod cdq_config;
pub mod outlier_config;

pub use catalog_config::CatalogConfig;
pub use cdq_config::{CdqConfig, ConfigOverrides};
pub use outlier_config::{OutlierConfig, StatsWindow};
