use crate::application::market_data::indicators::{direction_labels, relative_strength_index};
use crate::domain::ml::feature_registry::{FeatureRow, FeatureSet};
use crate::domain::trading::types::Candle;
use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

/// Cleaned training data plus the row to score.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub feature_set: FeatureSet,
    /// Rows with every feature and the label defined, oldest first
    pub rows: Vec<FeatureRow>,
    /// `labels[i]` is the direction label of `rows[i]`
    pub labels: Vec<u32>,
    /// Row to score: the last cleaned training row
    pub latest: Option<FeatureRow>,
    /// Full RSI column aligned with the input candles
    pub rsi: Vec<Option<f64>>,
    /// Number of input rows discarded during cleaning
    pub dropped: usize,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature matrix in `FeatureSet` column order
    pub fn features(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .filter_map(|r| r.to_vector(self.feature_set))
            .collect()
    }

    /// Distinct labels, ascending
    pub fn classes(&self) -> Vec<u32> {
        let mut classes = self.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Latest defined RSI value of the series
    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi.iter().rev().find_map(|v| *v)
    }
}

/// Turns a candle series into labelled feature rows
#[derive(Debug, Clone, Copy)]
pub struct DatasetBuilder {
    feature_set: FeatureSet,
    rsi_period: usize,
}

impl DatasetBuilder {
    pub fn new(feature_set: FeatureSet, rsi_period: usize) -> Self {
        Self {
            feature_set,
            rsi_period,
        }
    }

    pub fn build(&self, candles: &[Candle]) -> Result<TrainingSet> {
        let closes: Vec<f64> = candles.iter().map(Candle::close_f64).collect();
        let rsi = relative_strength_index(&closes, self.rsi_period)?;
        let labels = direction_labels(&closes);

        let mut rows = Vec::with_capacity(candles.len());
        let mut kept_labels = Vec::with_capacity(candles.len());

        for ((candle, rsi_value), label) in candles.iter().zip(&rsi).zip(&labels) {
            let row = FeatureRow {
                timestamp: candle.timestamp,
                close: candle.close.to_f64().unwrap_or(0.0),
                open: candle.open.to_f64().unwrap_or(0.0),
                high: candle.high.to_f64().unwrap_or(0.0),
                low: candle.low.to_f64().unwrap_or(0.0),
                volume: candle.volume.to_f64().unwrap_or(0.0),
                rsi: *rsi_value,
            };

            // Rows need every feature and a label to survive cleaning
            if let (Some(_), Some(label)) = (row.to_vector(self.feature_set), label) {
                rows.push(row);
                kept_labels.push(*label);
            }
        }
        let latest = rows.last().cloned();

        let dropped = candles.len() - rows.len();
        debug!(
            "DatasetBuilder: {} candles -> {} training rows ({} dropped, features={:?})",
            candles.len(),
            rows.len(),
            dropped,
            self.feature_set
        );

        Ok(TrainingSet {
            feature_set: self.feature_set,
            rows,
            labels: kept_labels,
            latest,
            rsi,
            dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let close = Decimal::from_f64_retain(*c).unwrap();
                Candle {
                    symbol: "TEST".to_string(),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: Decimal::new(1000, 0),
                    timestamp: i as i64 * 86_400_000,
                }
            })
            .collect()
    }

    #[test]
    fn test_basic_set_drops_only_final_row() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let set = DatasetBuilder::new(FeatureSet::Basic, 14)
            .build(&candles_from_closes(&closes))
            .unwrap();

        assert_eq!(set.len(), 19);
        assert_eq!(set.dropped, 1);
        assert!(set.labels.iter().all(|l| *l == 1));
        assert_eq!(set.latest.as_ref().unwrap().close, 118.0);
        assert_eq!(set.features().len(), set.len());
    }

    #[test]
    fn test_rsi_set_drops_warmup_and_final_row() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 3.0)
            .collect();
        let set = DatasetBuilder::new(FeatureSet::WithRsi, 14)
            .build(&candles_from_closes(&closes))
            .unwrap();

        assert_eq!(set.len(), 40 - 14 - 1);
        assert!(set.rows.iter().all(|r| r.rsi.is_some()));
        assert_eq!(set.rows[0].timestamp, 14 * 86_400_000);
        assert_eq!(set.latest.as_ref().unwrap().timestamp, 38 * 86_400_000);
        assert!(set.latest_rsi().is_some());
    }

    #[test]
    fn test_labels_are_binary_and_aligned() {
        let closes = [5.0, 6.0, 4.0, 4.0, 7.0];
        let set = DatasetBuilder::new(FeatureSet::Basic, 14)
            .build(&candles_from_closes(&closes))
            .unwrap();

        assert_eq!(set.labels, vec![1, 0, 0, 1]);
        assert_eq!(set.labels.len(), set.rows.len());
        assert_eq!(set.classes(), vec![0, 1]);
    }

    #[test]
    fn test_scored_row_is_last_labelled_row() {
        let closes: Vec<f64> = (0..400)
            .map(|i| 100.0 + (i as f64 * 0.21).sin() * 5.0)
            .collect();
        let set = DatasetBuilder::new(FeatureSet::WithRsi, 14)
            .build(&candles_from_closes(&closes))
            .unwrap();

        let latest = set.latest.as_ref().unwrap();
        assert_eq!(latest, set.rows.last().unwrap());
        assert_eq!(latest.timestamp, 398 * 86_400_000);
    }

    #[test]
    fn test_empty_series() {
        let set = DatasetBuilder::new(FeatureSet::WithRsi, 14)
            .build(&[])
            .unwrap();
        assert!(set.is_empty());
        assert!(set.latest.is_none());
        assert_eq!(set.dropped, 0);
    }
}
