//! National-by-year share of districts free of extreme outliers.
//!
//! Always computed at district granularity:
//! 1. per (district, year), the worst monthly flag (missing-aware max)
//! 2. per year, the mean of those worst-case flags across districts
//!
//! Rates are `round((1 - x) * 100, 2)`.

use std::collections::BTreeMap;

use cdq_core::constants::DISTRICT_ROLLUP_DECIMALS;
use cdq_core::errors::AnalysisError;
use cdq_core::types::collections::AdminPath;
use cdq_core::{AdminLevel, Dataset};

use crate::outliers::types::{OutlierRow, OutlierTable};
use crate::outliers::OutlierCore;

use super::rates::IncidenceSet;
use super::reducer::MissingAwareReducer;
use super::types::{ArtifactKind, ArtifactMetadata, SummaryRow, SummaryTable};

/// Rolls district-level outlier flags up to one row per year.
pub struct DistrictRollupBuilder<'a> {
    core: &'a OutlierCore,
}

impl<'a> DistrictRollupBuilder<'a> {
    pub fn new(core: &'a OutlierCore) -> Self {
        Self { core }
    }

    pub fn summarize(&self, data: &Dataset) -> Result<SummaryTable, AnalysisError> {
        let table = self.core.compute_all(data, AdminLevel::District)?;
        let summary = Self::summarize_table(&table)?;
        tracing::info!(
            years = summary.len(),
            indicators = summary.registry.len(),
            "district outlier rollup built"
        );
        Ok(summary)
    }

    /// Roll up an outlier table. The table must be at district level.
    pub fn summarize_table(table: &OutlierTable) -> Result<SummaryTable, AnalysisError> {
        table
            .level
            .ensure_one_of(&[AdminLevel::District], "district outlier rollup")?;

        let registry = &table.registry;

        // Stage 1: worst month per (district, year).
        let mut district_years: BTreeMap<(AdminPath, i32), Vec<&OutlierRow>> = BTreeMap::new();
        for row in &table.rows {
            district_years
                .entry((row.key.admin.clone(), row.key.year))
                .or_default()
                .push(row);
        }

        let mut by_year: BTreeMap<i32, Vec<Vec<Option<f64>>>> = BTreeMap::new();
        for ((_, year), members) in &district_years {
            let worst: Vec<Option<f64>> = registry
                .iter()
                .map(|(h, _)| {
                    MissingAwareReducer::MAX.reduce(members.iter().map(|r| r.stat(h).flag_f64()))
                })
                .collect();
            by_year.entry(*year).or_default().push(worst);
        }

        // Stage 2: mean across districts per year.
        let rows = by_year
            .into_iter()
            .map(|(year, districts)| {
                let per_indicator = registry
                    .iter()
                    .map(|(h, _)| {
                        MissingAwareReducer::MEAN.reduce(districts.iter().map(|d| d[h.index()]))
                    })
                    .collect();
                let incidence = IncidenceSet::new(per_indicator, registry);
                let (rates, all, four) = incidence.to_percentages(DISTRICT_ROLLUP_DECIMALS);
                SummaryRow {
                    admin: AdminPath::new(),
                    year,
                    rates,
                    mean_out_all: all,
                    mean_out_four: four,
                }
            })
            .collect();

        tracing::debug!(
            district_years = district_years.len(),
            "reduced district months to worst-case flags"
        );

        Ok(SummaryTable {
            kind: ArtifactKind::DistrictOutlierSummary,
            metadata: ArtifactMetadata {
                admin_level: AdminLevel::District,
                indicator: None,
            },
            admin_columns: Vec::new(),
            registry: registry.clone(),
            rows,
        })
    }
}
