use super::timeframe::Timeframe;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much history to request, in whole years (1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookbackPeriod {
    years: u8,
}

impl LookbackPeriod {
    pub const MIN_YEARS: u8 = 1;
    pub const MAX_YEARS: u8 = 5;

    pub fn years(years: u8) -> Result<Self> {
        if !(Self::MIN_YEARS..=Self::MAX_YEARS).contains(&years) {
            bail!(
                "Invalid lookback: {} years. Must be between {} and {}",
                years,
                Self::MIN_YEARS,
                Self::MAX_YEARS
            );
        }
        Ok(Self { years })
    }

    pub fn as_years(&self) -> u8 {
        self.years
    }

    /// Provider `range` parameter for this lookback at the given interval.
    ///
    /// Intraday intervals only reach back a limited number of days, so the
    /// range is expressed in days and capped when that limit applies.
    pub fn to_range_param(&self, timeframe: Timeframe) -> String {
        match timeframe.max_lookback_days() {
            Some(max_days) => {
                let days = (u32::from(self.years) * 365).min(max_days);
                format!("{}d", days)
            }
            None => format!("{}y", self.years),
        }
    }
}

impl Default for LookbackPeriod {
    fn default() -> Self {
        Self { years: 2 }
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}y", self.years)
    }
}
