//! Administrative granularity and its mapping to dataset columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADMINLEVEL_1_COLUMN, DEFAULT_DISTRICT_COLUMN};
use crate::errors::UsageError;

/// Granularity of geographic grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    National,
    #[serde(rename = "adminlevel_1")]
    AdminLevel1,
    District,
}

impl AdminLevel {
    pub const ALL: [AdminLevel; 3] = [Self::National, Self::AdminLevel1, Self::District];

    pub fn name(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::AdminLevel1 => "adminlevel_1",
            Self::District => "district",
        }
    }

    /// Names of every level, in order, for error messages.
    pub fn allowed_names(levels: &[AdminLevel]) -> Vec<String> {
        levels.iter().map(|l| l.name().to_string()).collect()
    }

    /// Fail with `UnsupportedAdminLevel` unless `self` is one of `allowed`.
    pub fn ensure_one_of(
        &self,
        allowed: &[AdminLevel],
        operation: &'static str,
    ) -> Result<(), UsageError> {
        if allowed.contains(self) {
            Ok(())
        } else {
            Err(UsageError::UnsupportedAdminLevel {
                level: self.name().to_string(),
                operation,
                allowed: Self::allowed_names(allowed),
            })
        }
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdminLevel {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.name() == s)
            .ok_or_else(|| UsageError::InvalidAdminLevel {
                value: s.to_string(),
                allowed: Self::allowed_names(&Self::ALL),
            })
    }
}

/// Maps an administrative level to the ordered dataset columns identifying
/// a unit at that level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminColumns {
    adminlevel_1: String,
    district: String,
}

impl AdminColumns {
    pub fn new(adminlevel_1: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            adminlevel_1: adminlevel_1.into(),
            district: district.into(),
        }
    }

    /// `national → []`, `adminlevel_1 → [area]`, `district → [area, district]`.
    pub fn columns(&self, level: AdminLevel) -> Vec<&str> {
        match level {
            AdminLevel::National => Vec::new(),
            AdminLevel::AdminLevel1 => vec![self.adminlevel_1.as_str()],
            AdminLevel::District => vec![self.adminlevel_1.as_str(), self.district.as_str()],
        }
    }

    /// Columns every dataset must carry, regardless of the requested level.
    pub fn required(&self) -> Vec<&str> {
        self.columns(AdminLevel::District)
    }
}

impl Default for AdminColumns {
    fn default() -> Self {
        Self::new(DEFAULT_ADMINLEVEL_1_COLUMN, DEFAULT_DISTRICT_COLUMN)
    }
}
