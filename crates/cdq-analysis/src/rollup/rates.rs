//! Per-indicator outlier incidences and the two composite rates.

use crate::outliers::types::IndicatorRegistry;

use super::reducer::{non_outlier_percent, MissingAwareReducer};

/// Outlier incidence per indicator for one summary row, before the
/// percentage transform.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceSet {
    /// Aligned with the registry.
    pub per_indicator: Vec<Option<f64>>,
    /// Mean incidence across every indicator.
    pub all: Option<f64>,
    /// Mean incidence across indicators outside the in-patient group.
    pub four: Option<f64>,
}

impl IncidenceSet {
    /// Build composites from per-indicator incidences. Missing incidences
    /// are excluded from both composites.
    pub fn new(per_indicator: Vec<Option<f64>>, registry: &IndicatorRegistry) -> Self {
        let all = MissingAwareReducer::MEAN.reduce(per_indicator.iter().copied());
        let four = MissingAwareReducer::MEAN.reduce(
            registry
                .tracer_handles()
                .into_iter()
                .map(|h| per_indicator[h.index()]),
        );
        Self {
            per_indicator,
            all,
            four,
        }
    }

    /// Convert every incidence to a rounded non-outlier percentage.
    pub fn to_percentages(&self, decimals: u32) -> (Vec<Option<f64>>, Option<f64>, Option<f64>) {
        (
            self.per_indicator
                .iter()
                .map(|x| non_outlier_percent(*x, decimals))
                .collect(),
            non_outlier_percent(self.all, decimals),
            non_outlier_percent(self.four, decimals),
        )
    }
}
