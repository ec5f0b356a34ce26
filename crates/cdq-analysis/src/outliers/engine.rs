//! OutlierCore: monthly aggregation followed by grouped robust statistics.
//!
//! This is the single computation every rollup builds on.

use cdq_core::config::{CdqConfig, OutlierConfig, StatsWindow};
use cdq_core::errors::{AnalysisError, ConfigError};
use cdq_core::types::collections::{AdminPath, FxHashMap};
use cdq_core::{AdminColumns, AdminLevel, Dataset, IndicatorCatalog};

use super::aggregator::{MonthlyAggregator, MonthlyRow};
use super::robust::RobustGroupStats;
use super::types::{IndicatorRegistry, OutlierRow, OutlierTable};

/// Computes record-level medians, MADs and outlier flags.
#[derive(Debug, Clone)]
pub struct OutlierCore {
    catalog: IndicatorCatalog,
    admin_columns: AdminColumns,
    stats: RobustGroupStats,
    window: StatsWindow,
    parallel: bool,
}

impl OutlierCore {
    pub fn new(
        catalog: IndicatorCatalog,
        admin_columns: AdminColumns,
        config: &OutlierConfig,
    ) -> Self {
        Self {
            catalog,
            admin_columns,
            stats: RobustGroupStats::from_config(config),
            window: config.effective_stats_window(),
            parallel: config.effective_parallel(),
        }
    }

    /// Default catalog, default admin columns, default outlier settings.
    pub fn with_defaults() -> Self {
        Self::new(
            IndicatorCatalog::default(),
            AdminColumns::default(),
            &OutlierConfig::default(),
        )
    }

    pub fn from_config(config: &CdqConfig) -> Result<Self, ConfigError> {
        CdqConfig::validate(config)?;
        Ok(Self::new(
            config.catalog.catalog()?,
            config.catalog.admin_columns(),
            &config.outliers,
        ))
    }

    pub fn catalog(&self) -> &IndicatorCatalog {
        &self.catalog
    }

    pub fn admin_columns(&self) -> &AdminColumns {
        &self.admin_columns
    }

    pub fn stats(&self) -> &RobustGroupStats {
        &self.stats
    }

    pub fn window(&self) -> StatsWindow {
        self.window
    }

    /// Outlier table for every catalog indicator.
    pub fn compute_all(
        &self,
        data: &Dataset,
        level: AdminLevel,
    ) -> Result<OutlierTable, AnalysisError> {
        let indicators: Vec<&str> = self.catalog.all().iter().map(String::as_str).collect();
        self.compute(data, &indicators, level)
    }

    /// One row per (unit at `level`, year, month) with value, median, MAD and
    /// flag for each of `indicators`.
    ///
    /// Fails before touching data if an indicator is not in the catalog
    /// (`UsageError`) or the dataset lacks a required column (`SchemaError`).
    pub fn compute(
        &self,
        data: &Dataset,
        indicators: &[&str],
        level: AdminLevel,
    ) -> Result<OutlierTable, AnalysisError> {
        for name in indicators {
            self.catalog.require(name)?;
        }
        data.validate(&self.admin_columns.required(), indicators)?;

        let registry = IndicatorRegistry::build(indicators, &self.catalog);
        let level_columns = self.admin_columns.columns(level);
        let admin_idx: Vec<usize> = level_columns
            .iter()
            .filter_map(|c| data.admin_index(c))
            .collect();
        let indicator_idx: Vec<usize> = registry
            .names()
            .filter_map(|name| data.indicator_index(name))
            .collect();

        let monthly = MonthlyAggregator::aggregate(data, &admin_idx, &indicator_idx);
        let groups = self.partition(&monthly);

        let indeterminate = self
            .stats
            .indeterminate_groups(&monthly, &groups, registry.len());
        if indeterminate > 0 {
            tracing::warn!(
                level = %level,
                indeterminate,
                "groups with fewer than two observations; their flags are missing"
            );
        }

        let stats = self
            .stats
            .compute(&monthly, &groups, registry.len(), self.parallel);

        let rows: Vec<OutlierRow> = monthly
            .into_iter()
            .zip(stats)
            .map(|(row, stats)| OutlierRow { key: row.key, stats })
            .collect();

        tracing::debug!(
            level = %level,
            window = %self.window,
            indicators = registry.len(),
            groups = groups.len(),
            rows = rows.len(),
            "computed outlier table"
        );

        Ok(OutlierTable {
            level,
            admin_columns: level_columns.iter().map(|c| c.to_string()).collect(),
            registry,
            rows,
        })
    }

    /// Partition monthly rows into the groups that share a median/MAD.
    fn partition(&self, rows: &[MonthlyRow]) -> Vec<Vec<usize>> {
        let mut groups: FxHashMap<(AdminPath, Option<i32>), Vec<usize>> = FxHashMap::default();
        for (i, row) in rows.iter().enumerate() {
            let year = match self.window {
                StatsWindow::UnitSeries => None,
                StatsWindow::UnitYear => Some(row.key.year),
            };
            groups
                .entry((row.key.admin.clone(), year))
                .or_default()
                .push(i);
        }
        groups.into_values().collect()
    }
}
