//! Outlier detection: monthly aggregation followed by grouped median/MAD flags.
//!
//! A value is an extreme outlier when it lies more than `mad_multiple`
//! scaled MADs from its group median (Hampel X84 with a multiple of 5).

pub mod aggregator;
pub mod engine;
pub mod robust;
pub mod types;

pub use engine::OutlierCore;
pub use aggregator::{MonthlyAggregator, MonthlyRow};
pub use robust::{GroupEstimate, RobustGroupStats};
pub use types::{
    GroupKey, IndicatorColumns, IndicatorHandle, IndicatorRegistry, IndicatorStats, OutlierRow,
    OutlierTable,
};
