//! Annual per-unit outlier summary.
//!
//! For each (unit, year) and indicator: `round((1 - mean(flag)) * 100, 0)`,
//! missing flags excluded from the mean.

use std::collections::BTreeMap;

use cdq_core::constants::ANNUAL_DECIMALS;
use cdq_core::errors::AnalysisError;
use cdq_core::types::collections::AdminPath;
use cdq_core::{AdminLevel, Dataset};

use crate::outliers::types::{OutlierRow, OutlierTable};
use crate::outliers::OutlierCore;

use super::rates::IncidenceSet;
use super::reducer::MissingAwareReducer;
use super::types::{ArtifactKind, ArtifactMetadata, SummaryRow, SummaryTable};

/// Rolls OutlierCore output up to one row per (unit, year).
pub struct AnnualSummaryBuilder<'a> {
    core: &'a OutlierCore,
}

impl<'a> AnnualSummaryBuilder<'a> {
    pub fn new(core: &'a OutlierCore) -> Self {
        Self { core }
    }

    /// Compute outliers for every catalog indicator at `level` and summarize.
    pub fn summarize(
        &self,
        data: &Dataset,
        level: AdminLevel,
    ) -> Result<SummaryTable, AnalysisError> {
        let table = self.core.compute_all(data, level)?;
        let summary = Self::summarize_table(&table);
        tracing::info!(
            admin_level = %level,
            rows = summary.len(),
            indicators = summary.registry.len(),
            "annual outlier summary built"
        );
        Ok(summary)
    }

    /// Summarize an already computed outlier table at its own level.
    pub fn summarize_table(table: &OutlierTable) -> SummaryTable {
        let mut groups: BTreeMap<(AdminPath, i32), Vec<&OutlierRow>> = BTreeMap::new();
        for row in &table.rows {
            groups
                .entry((row.key.admin.clone(), row.key.year))
                .or_default()
                .push(row);
        }

        let rows = groups
            .into_iter()
            .map(|((admin, year), members)| {
                let per_indicator = table
                    .registry
                    .iter()
                    .map(|(h, _)| {
                        MissingAwareReducer::MEAN
                            .reduce(members.iter().map(|r| r.stat(h).flag_f64()))
                    })
                    .collect();
                let incidence = IncidenceSet::new(per_indicator, &table.registry);
                let (rates, all, four) = incidence.to_percentages(ANNUAL_DECIMALS);
                SummaryRow {
                    admin,
                    year,
                    rates,
                    mean_out_all: all,
                    mean_out_four: four,
                }
            })
            .collect();

        SummaryTable {
            kind: ArtifactKind::AnnualOutlierSummary,
            metadata: ArtifactMetadata {
                admin_level: table.level,
                indicator: None,
            },
            admin_columns: table.admin_columns.clone(),
            registry: table.registry.clone(),
            rows,
        }
    }
}
