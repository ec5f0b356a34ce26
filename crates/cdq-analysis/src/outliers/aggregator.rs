//! Monthly aggregation: one mean value per indicator per unit per period.
//!
//! Raw datasets may carry several submissions for the same unit and month.
//! Collapsing them first keeps duplicate submissions from pulling the
//! median/MAD estimate.

use cdq_core::types::collections::{AdminPath, FxHashMap};
use cdq_core::types::dataset::present;
use cdq_core::Dataset;

use super::types::GroupKey;

/// One aggregated (unit, year, month) row.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub key: GroupKey,
    /// Per-indicator mean of non-missing values; `None` if all were missing.
    pub values: Vec<Option<f64>>,
}

/// Running sum and count of non-missing values.
#[derive(Debug, Clone, Copy, Default)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = present(value) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Collapses raw records to a canonical monthly series.
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Group `data` by the administrative columns at `admin_idx` plus year
    /// and month, averaging the indicator columns at `indicator_idx`.
    ///
    /// Output rows are sorted by key; `values` follow `indicator_idx` order.
    pub fn aggregate(
        data: &Dataset,
        admin_idx: &[usize],
        indicator_idx: &[usize],
    ) -> Vec<MonthlyRow> {
        let mut groups: FxHashMap<GroupKey, Vec<MeanAcc>> = FxHashMap::default();

        for record in data.records() {
            let admin: AdminPath = admin_idx.iter().map(|&i| record.admin[i].clone()).collect();
            let key = GroupKey::monthly(admin, record.year, record.month);
            let accs = groups
                .entry(key)
                .or_insert_with(|| vec![MeanAcc::default(); indicator_idx.len()]);
            for (acc, &col) in accs.iter_mut().zip(indicator_idx) {
                acc.push(record.values[col]);
            }
        }

        let mut rows: Vec<MonthlyRow> = groups
            .into_iter()
            .map(|(key, accs)| MonthlyRow {
                key,
                values: accs.iter().map(MeanAcc::mean).collect(),
            })
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        tracing::debug!(
            records = data.len(),
            monthly_rows = rows.len(),
            "aggregated records to monthly means"
        );
        rows
    }
}
