use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sampling interval of the analysed price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    OneHour,
    #[default]
    OneDay,
    OneWeek,
}

impl Timeframe {
    /// Returns the duration of this timeframe in minutes
    pub fn to_minutes(&self) -> usize {
        match self {
            Timeframe::OneHour => 60,
            Timeframe::OneDay => 1440,
            Timeframe::OneWeek => 10080,
        }
    }

    /// Returns the duration in seconds
    pub fn to_seconds(&self) -> i64 {
        (self.to_minutes() * 60) as i64
    }

    /// Converts to Yahoo Finance chart interval string
    pub fn to_yahoo_string(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::OneDay => "1d",
            Timeframe::OneWeek => "1wk",
        }
    }

    /// Longest history the provider serves at this interval, in days.
    pub fn max_lookback_days(&self) -> Option<u32> {
        match self {
            Timeframe::OneHour => Some(730),
            Timeframe::OneDay | Timeframe::OneWeek => None,
        }
    }

    /// Human wording for "the next period" used in prediction callouts
    pub fn horizon_label(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "next hour",
            Timeframe::OneDay => "tomorrow",
            Timeframe::OneWeek => "next week",
        }
    }

    /// Label shown in the timeframe selector
    pub fn display_name(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "Hourly (1h)",
            Timeframe::OneDay => "Daily (1d)",
            Timeframe::OneWeek => "Weekly (1wk)",
        }
    }

    /// Returns all available timeframes in ascending order
    pub fn all() -> Vec<Timeframe> {
        vec![Timeframe::OneHour, Timeframe::OneDay, Timeframe::OneWeek]
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1h" | "1hour" | "onehour" | "hourly" => Ok(Timeframe::OneHour),
            "1d" | "1day" | "oneday" | "daily" => Ok(Timeframe::OneDay),
            "1wk" | "1w" | "1week" | "oneweek" | "weekly" => Ok(Timeframe::OneWeek),
            _ => Err(anyhow!(
                "Invalid timeframe: '{}'. Valid options: 1h, 1d, 1wk",
                s
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_yahoo_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minutes() {
        assert_eq!(Timeframe::OneHour.to_minutes(), 60);
        assert_eq!(Timeframe::OneDay.to_minutes(), 1440);
        assert_eq!(Timeframe::OneWeek.to_minutes(), 10080);
        assert_eq!(Timeframe::OneDay.to_seconds(), 86400);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(Timeframe::from_str("1h").unwrap(), Timeframe::OneHour);
        assert_eq!(Timeframe::from_str("Daily").unwrap(), Timeframe::OneDay);
        assert_eq!(Timeframe::from_str("1wk").unwrap(), Timeframe::OneWeek);
        assert!(Timeframe::from_str("5m").is_err());
    }

    #[test]
    fn test_horizon_wording() {
        assert_eq!(Timeframe::OneDay.horizon_label(), "tomorrow");
        assert_eq!(Timeframe::OneHour.horizon_label(), "next hour");
        assert_eq!(Timeframe::OneWeek.horizon_label(), "next week");
    }

    #[test]
    fn test_display_matches_provider_interval() {
        for tf in Timeframe::all() {
            assert_eq!(tf.to_string(), tf.to_yahoo_string());
        }
    }
}
