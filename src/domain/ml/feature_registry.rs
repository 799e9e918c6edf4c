use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordered list of feature names.
/// This order MUST match `FeatureRow::to_vector`.
pub const BASIC_FEATURE_NAMES: &[&str] = &["close", "open", "high", "low", "volume"];
pub const RSI_FEATURE_NAMES: &[&str] = &["close", "open", "high", "low", "volume", "rsi"];

/// Which columns feed the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FeatureSet {
    /// OHLCV only
    Basic,
    /// OHLCV plus RSI
    #[default]
    WithRsi,
}

impl FeatureSet {
    pub fn names(&self) -> &'static [&'static str] {
        match self {
            FeatureSet::Basic => BASIC_FEATURE_NAMES,
            FeatureSet::WithRsi => RSI_FEATURE_NAMES,
        }
    }

    pub fn uses_rsi(&self) -> bool {
        matches!(self, FeatureSet::WithRsi)
    }
}

impl FromStr for FeatureSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "basic" | "ohlcv" => Ok(FeatureSet::Basic),
            "with_rsi" | "rsi" | "ohlcv_rsi" => Ok(FeatureSet::WithRsi),
            _ => bail!("Invalid FEATURE_SET: {}. Must be 'basic' or 'with_rsi'", s),
        }
    }
}

/// Model input for one timestamp
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub timestamp: i64,
    pub close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    pub rsi: Option<f64>,
}

impl FeatureRow {
    /// Converts the row into the model's input vector for `set`.
    /// Returns `None` when a required feature (RSI) is undefined.
    pub fn to_vector(&self, set: FeatureSet) -> Option<Vec<f64>> {
        let mut values = vec![self.close, self.open, self.high, self.low, self.volume];
        if set.uses_rsi() {
            values.push(self.rsi?);
        }
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(rsi: Option<f64>) -> FeatureRow {
        FeatureRow {
            timestamp: 0,
            close: 10.0,
            open: 9.0,
            high: 11.0,
            low: 8.0,
            volume: 500.0,
            rsi,
        }
    }

    #[test]
    fn test_feature_vector_length() {
        let r = row(Some(55.0));
        for set in [FeatureSet::Basic, FeatureSet::WithRsi] {
            assert_eq!(r.to_vector(set).unwrap().len(), set.names().len());
        }
    }

    #[test]
    fn test_feature_order_matches_names() {
        let v = row(Some(55.0)).to_vector(FeatureSet::WithRsi).unwrap();
        assert_eq!(v, vec![10.0, 9.0, 11.0, 8.0, 500.0, 55.0]);
    }

    #[test]
    fn test_missing_rsi() {
        let r = row(None);
        assert!(r.to_vector(FeatureSet::WithRsi).is_none());
        assert!(r.to_vector(FeatureSet::Basic).is_some());
    }

    #[test]
    fn test_parse_feature_set() {
        assert_eq!("basic".parse::<FeatureSet>().unwrap(), FeatureSet::Basic);
        assert_eq!("WITH_RSI".parse::<FeatureSet>().unwrap(), FeatureSet::WithRsi);
        assert!("macd".parse::<FeatureSet>().is_err());
    }
}
