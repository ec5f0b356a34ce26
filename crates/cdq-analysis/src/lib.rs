//! # cdq-analysis
//!
//! Robust outlier detection for monthly health-facility indicator data,
//! and the rollups that turn per-record flags into non-outlier rates.
//!
//! ## Modules
//!
//! - [`outliers`]: monthly aggregation, median/MAD statistics, 5×MAD flags
//! - [`rollup`]: annual per-unit summary, national district rollup, unit list

pub mod outliers;
pub mod rollup;

pub use outliers::{OutlierCore, OutlierTable};
pub use rollup::{
    AnnualSummaryBuilder, DistrictRollupBuilder, SummaryTable, UnitList, UnitListBuilder,
};
