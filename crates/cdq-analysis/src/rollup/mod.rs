//! Rollups: turn per-record outlier flags into non-outlier rates.
//!
//! - Annual summary: per (unit, year) mean of monthly flags, 0 decimals.
//! - District rollup: worst month per (district, year), then mean across
//!   districts per year, 2 decimals.
//! - Unit list: one indicator's monthly value/median/MAD/flag per unit.

pub mod annual;
pub mod district;
pub mod rates;
pub mod reducer;
pub mod types;
pub mod unit_list;

pub use annual::AnnualSummaryBuilder;
pub use district::DistrictRollupBuilder;
pub use reducer::{round_half_even, MissingAwareReducer, ReduceOp};
pub use types::{
    ArtifactKind, ArtifactMetadata, SummaryRow, SummaryTable, UnitList, UnitListRow,
};
pub use unit_list::UnitListBuilder;
