//! Missing-aware reduction shared by every rollup.
//!
//! Missing (`None` or NaN) inputs are skipped. If nothing remains the
//! result is missing, never the operation's identity: a group with no
//! evaluable observations is "insufficient data", not "outlier-free".

/// Reduction applied to the present values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    Max,
    Mean,
}

/// A reducer over optional values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingAwareReducer {
    op: ReduceOp,
}

impl MissingAwareReducer {
    /// Worst case: the maximum present value.
    pub const MAX: Self = Self { op: ReduceOp::Max };
    /// Average of the present values.
    pub const MEAN: Self = Self { op: ReduceOp::Mean };

    pub fn new(op: ReduceOp) -> Self {
        Self { op }
    }

    pub fn op(&self) -> ReduceOp {
        self.op
    }

    pub fn reduce<I>(&self, values: I) -> Option<f64>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut count = 0usize;
        let mut acc = 0.0f64;
        for v in values.into_iter().flatten().filter(|v| !v.is_nan()) {
            acc = match (self.op, count) {
                (_, 0) => v,
                (ReduceOp::Max, _) => acc.max(v),
                (ReduceOp::Mean, _) => acc + v,
            };
            count += 1;
        }
        match (self.op, count) {
            (_, 0) => None,
            (ReduceOp::Max, _) => Some(acc),
            (ReduceOp::Mean, n) => Some(acc / n as f64),
        }
    }
}

/// Round to `decimals` places, ties to even.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// Turn an outlier incidence in [0, 1] into a rounded non-outlier percentage.
pub fn non_outlier_percent(incidence: Option<f64>, decimals: u32) -> Option<f64> {
    incidence.map(|x| round_half_even((1.0 - x) * 100.0, decimals))
}
