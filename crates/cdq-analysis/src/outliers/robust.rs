//! Grouped median/MAD statistics and the 5×MAD outlier rule.
//!
//! For each (group, indicator):
//! - `median` = median of the non-missing values (≥1 value)
//! - `mad`    = `scale * median(|x - median|)` (≥2 values, else undefined)
//! - `flag`   = 1 if `|x - median| > multiple * mad`, else 0
//!
//! The threshold is exclusive. A zero MAD flags every value that differs
//! from the median. Missing values and undefined MADs yield no flag.

use rayon::prelude::*;

use cdq_core::config::OutlierConfig;
use cdq_core::constants::{DEFAULT_MAD_MULTIPLE, DEFAULT_MAD_SCALE, MIN_MAD_OBSERVATIONS};
use cdq_core::types::dataset::present;

use super::aggregator::MonthlyRow;
use super::types::IndicatorStats;

/// Median of a slice, sorting it in place. `None` when empty.
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Unscaled median absolute deviation around `center`.
pub fn raw_mad(values: &[f64], center: f64) -> Option<f64> {
    let mut deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&mut deviations)
}

/// Median and scaled MAD of one group's values for one indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupEstimate {
    pub median: Option<f64>,
    pub mad: Option<f64>,
    /// Non-missing observations the estimate was computed from.
    pub observations: usize,
}

impl GroupEstimate {
    pub fn is_determinate(&self) -> bool {
        self.mad.is_some()
    }
}

/// Median/MAD estimator and flagging rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustGroupStats {
    scale: f64,
    multiple: f64,
}

impl Default for RobustGroupStats {
    fn default() -> Self {
        Self::new(DEFAULT_MAD_SCALE, DEFAULT_MAD_MULTIPLE)
    }
}

impl RobustGroupStats {
    /// `scale` multiplies the raw MAD; `multiple` is the number of scaled
    /// MADs a value may lie from the median before it is flagged.
    pub fn new(scale: f64, multiple: f64) -> Self {
        Self { scale, multiple }
    }

    pub fn from_config(config: &OutlierConfig) -> Self {
        Self::new(config.effective_mad_scale(), config.effective_mad_multiple())
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn multiple(&self) -> f64 {
        self.multiple
    }

    /// Estimate median and scaled MAD from a group's values. NaN counts as missing.
    pub fn estimate<I>(&self, values: I) -> GroupEstimate
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut observed: Vec<f64> = values.into_iter().filter_map(present).collect();
        let observations = observed.len();
        let med = median(&mut observed);
        let mad = match med {
            Some(center) if observations >= MIN_MAD_OBSERVATIONS => {
                raw_mad(&observed, center).map(|m| m * self.scale)
            }
            _ => None,
        };
        GroupEstimate {
            median: med,
            mad,
            observations,
        }
    }

    /// Flag one value against its group estimate.
    pub fn flag(&self, value: Option<f64>, estimate: &GroupEstimate) -> Option<u8> {
        let v = present(value)?;
        let center = estimate.median?;
        let mad = estimate.mad?;
        Some(u8::from((v - center).abs() > self.multiple * mad))
    }

    /// Statistics for every row of one indicator column, given a partition
    /// of row indices into groups. Returns one entry per row.
    pub fn column(
        &self,
        rows: &[MonthlyRow],
        groups: &[Vec<usize>],
        indicator: usize,
    ) -> Vec<IndicatorStats> {
        let mut out = vec![IndicatorStats::default(); rows.len()];
        for members in groups {
            let estimate = self.estimate(members.iter().map(|&r| rows[r].values[indicator]));
            for &r in members {
                let value = present(rows[r].values[indicator]);
                out[r] = IndicatorStats {
                    value,
                    median: estimate.median,
                    mad: estimate.mad,
                    flag: self.flag(value, &estimate),
                };
            }
        }
        out
    }

    /// Statistics for all indicators. Indicators are independent, so
    /// `parallel` spreads them across the rayon pool without changing results.
    ///
    /// Returned as `[row][indicator]`.
    pub fn compute(
        &self,
        rows: &[MonthlyRow],
        groups: &[Vec<usize>],
        indicators: usize,
        parallel: bool,
    ) -> Vec<Vec<IndicatorStats>> {
        let columns: Vec<Vec<IndicatorStats>> = if parallel {
            (0..indicators)
                .into_par_iter()
                .map(|i| self.column(rows, groups, i))
                .collect()
        } else {
            (0..indicators)
                .map(|i| self.column(rows, groups, i))
                .collect()
        };

        (0..rows.len())
            .map(|r| columns.iter().map(|col| col[r]).collect())
            .collect()
    }

    /// Number of (group, indicator) pairs whose MAD is undefined.
    pub fn indeterminate_groups(
        &self,
        rows: &[MonthlyRow],
        groups: &[Vec<usize>],
        indicators: usize,
    ) -> usize {
        (0..indicators)
            .map(|i| {
                groups
                    .iter()
                    .filter(|members| {
                        members
                            .iter()
                            .filter(|&&r| present(rows[r].values[i]).is_some())
                            .count()
                            < MIN_MAD_OBSERVATIONS
                    })
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(xs: &[f64]) -> Vec<Option<f64>> {
        xs.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut Vec::new()), None);
    }

    #[test]
    fn test_estimate_scaled_mad() {
        let stats = RobustGroupStats::default();
        let est = stats.estimate(some(&[1.0, 2.0, 3.0, 4.0, 100.0]));
        assert_eq!(est.median, Some(3.0));
        // |x - 3| = 2, 1, 0, 1, 97 → median 1
        assert_eq!(est.mad, Some(DEFAULT_MAD_SCALE));
        assert_eq!(est.observations, 5);
    }

    #[test]
    fn test_single_observation_has_no_mad() {
        let stats = RobustGroupStats::default();
        let est = stats.estimate(vec![Some(5.0), None, Some(f64::NAN)]);
        assert_eq!(est.median, Some(5.0));
        assert_eq!(est.mad, None);
        assert!(!est.is_determinate());
        assert_eq!(stats.flag(Some(5.0), &est), None);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let stats = RobustGroupStats::new(1.0, 5.0);
        let est = stats.estimate(some(&[0.0, 0.0, 1.0, -1.0, 5.0]));
        assert_eq!(est.median, Some(0.0));
        assert_eq!(est.mad, Some(1.0));
        assert_eq!(stats.flag(Some(5.0), &est), Some(0));
        assert_eq!(stats.flag(Some(5.0 + 1e-9), &est), Some(1));
        assert_eq!(stats.flag(Some(-5.0 - 1e-9), &est), Some(1));
    }

    #[test]
    fn test_zero_mad_flags_any_difference() {
        let stats = RobustGroupStats::default();
        let est = stats.estimate(some(&[7.0, 7.0, 7.0, 7.0, 8.0]));
        assert_eq!(est.mad, Some(0.0));
        assert_eq!(stats.flag(Some(7.0), &est), Some(0));
        assert_eq!(stats.flag(Some(8.0), &est), Some(1));
    }

    #[test]
    fn test_missing_value_never_flagged() {
        let stats = RobustGroupStats::default();
        let est = stats.estimate(some(&[1.0, 2.0, 3.0]));
        assert_eq!(stats.flag(None, &est), None);
        assert_eq!(stats.flag(Some(f64::NAN), &est), None);
    }
}
