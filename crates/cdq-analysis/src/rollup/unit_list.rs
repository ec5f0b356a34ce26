//! Per-unit listing of one indicator's outlier statistics, for inspection.

use cdq_core::errors::AnalysisError;
use cdq_core::{AdminLevel, Dataset};

use crate::outliers::types::IndicatorColumns;
use crate::outliers::OutlierCore;

use super::types::{ArtifactKind, ArtifactMetadata, UnitList, UnitListRow};

/// Levels at which a unit list is meaningful.
const UNIT_LEVELS: [AdminLevel; 2] = [AdminLevel::AdminLevel1, AdminLevel::District];

/// Projects OutlierCore output onto one indicator.
pub struct UnitListBuilder<'a> {
    core: &'a OutlierCore,
}

impl<'a> UnitListBuilder<'a> {
    pub fn new(core: &'a OutlierCore) -> Self {
        Self { core }
    }

    /// Value, median, MAD and raw flag of `indicator` per unit and month.
    ///
    /// `national` is rejected: there is only one unit at that level.
    pub fn list(
        &self,
        data: &Dataset,
        indicator: &str,
        level: AdminLevel,
    ) -> Result<UnitList, AnalysisError> {
        level.ensure_one_of(&UNIT_LEVELS, "outlier unit list")?;
        self.core.catalog().require(indicator)?;

        // A single-indicator table: each row carries exactly one stats entry.
        let table = self.core.compute(data, &[indicator], level)?;
        let rows: Vec<UnitListRow> = table
            .rows
            .iter()
            .filter_map(|row| {
                let stat = row.stats.first()?;
                Some(UnitListRow {
                    admin: row.key.admin.clone(),
                    year: row.key.year,
                    month: row.key.month?,
                    value: stat.value,
                    median: stat.median,
                    mad: stat.mad,
                    flag: stat.flag,
                })
            })
            .collect();

        tracing::info!(
            admin_level = %level,
            indicator,
            rows = rows.len(),
            flagged = rows.iter().filter(|r| r.flag == Some(1)).count(),
            "outlier unit list built"
        );

        Ok(UnitList {
            kind: ArtifactKind::OutlierUnitList,
            metadata: ArtifactMetadata {
                admin_level: level,
                indicator: Some(indicator.to_string()),
            },
            admin_columns: table.admin_columns,
            indicator: IndicatorColumns::new(
                indicator,
                self.core.catalog().is_in_patient(indicator),
            ),
            rows,
        })
    }
}
