//! Numeric and naming constants shared by the engine.

/// Normal-consistency constant for the MAD: for normally distributed data,
/// `1.4826 * MAD` estimates the standard deviation, so a 5×MAD threshold
/// sits at roughly five standard deviations.
pub const DEFAULT_MAD_SCALE: f64 = 1.4826;

/// Multiple of the (scaled) MAD beyond which a value is an extreme outlier.
pub const DEFAULT_MAD_MULTIPLE: f64 = 5.0;

/// Minimum number of non-missing observations for a MAD to be defined.
pub const MIN_MAD_OBSERVATIONS: usize = 2;

/// Decimal places for annual per-unit non-outlier percentages.
pub const ANNUAL_DECIMALS: u32 = 0;

/// Decimal places for the national-by-year district rollup.
pub const DISTRICT_ROLLUP_DECIMALS: u32 = 2;

pub const MEDIAN_SUFFIX: &str = "_med";
pub const MAD_SUFFIX: &str = "_mad";
pub const FLAG_SUFFIX: &str = "_outlier5std";

pub const YEAR_COLUMN: &str = "year";
pub const MONTH_COLUMN: &str = "month";
pub const MEAN_OUT_ALL_COLUMN: &str = "mean_out_all";
pub const MEAN_OUT_FOUR_COLUMN: &str = "mean_out_four";

pub const DEFAULT_ADMINLEVEL_1_COLUMN: &str = "area";
pub const DEFAULT_DISTRICT_COLUMN: &str = "district";
pub const DEFAULT_IN_PATIENT_GROUP: &str = "ipd";
