//! Outlier detection configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAD_MULTIPLE, DEFAULT_MAD_SCALE};

/// Which monthly rows share one median/MAD estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsWindow {
    /// The unit's whole monthly series across every year.
    #[default]
    UnitSeries,
    /// The unit's monthly series within one year.
    UnitYear,
}

impl StatsWindow {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnitSeries => "unit_series",
            Self::UnitYear => "unit_year",
        }
    }
}

impl fmt::Display for StatsWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatsWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unit_series" => Ok(Self::UnitSeries),
            "unit_year" => Ok(Self::UnitYear),
            other => Err(format!(
                "unknown stats window '{other}'; expected unit_series or unit_year"
            )),
        }
    }
}

/// Configuration for robust outlier detection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutlierConfig {
    /// Multiplier applied to the raw MAD. Default: 1.4826.
    pub mad_scale: Option<f64>,
    /// Number of scaled MADs beyond which a value is flagged. Default: 5.0.
    pub mad_multiple: Option<f64>,
    /// Grouping of monthly rows for the median/MAD. Default: unit_series.
    pub stats_window: Option<StatsWindow>,
    /// Compute indicators in parallel with rayon. Default: false.
    pub parallel: Option<bool>,
}

impl OutlierConfig {
    pub fn effective_mad_scale(&self) -> f64 {
        self.mad_scale.unwrap_or(DEFAULT_MAD_SCALE)
    }

    pub fn effective_mad_multiple(&self) -> f64 {
        self.mad_multiple.unwrap_or(DEFAULT_MAD_MULTIPLE)
    }

    pub fn effective_stats_window(&self) -> StatsWindow {
        self.stats_window.unwrap_or_default()
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }
}
