use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// One OHLCV bar. `timestamp` is the bar open time in Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
    pub timestamp: i64,
}

impl Candle {
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(0.0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Latest price and its change against the previous bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSnapshot {
    pub last_close: Decimal,
    pub previous_close: Option<Decimal>,
    pub timestamp: i64,
}

impl PriceSnapshot {
    /// Snapshot of the last candle, or `None` for an empty series
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        let last = candles.last()?;
        let previous_close = candles
            .len()
            .checked_sub(2)
            .and_then(|i| candles.get(i))
            .map(|c| c.close);

        Some(Self {
            last_close: last.close,
            previous_close,
            timestamp: last.timestamp,
        })
    }

    pub fn change(&self) -> Option<Decimal> {
        self.previous_close.map(|prev| self.last_close - prev)
    }

    /// Period-over-period change in percent. `None` without a usable previous close.
    pub fn change_pct(&self) -> Option<Decimal> {
        let prev = self.previous_close?;
        if prev.is_zero() {
            return None;
        }
        Some((self.last_close - prev) / prev * Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle(close: Decimal, timestamp: i64) -> Candle {
        Candle {
            symbol: "TEST".to_string(),
            open: close,
            high: close,
            low: close,
            close,
            volume: dec!(1000),
            timestamp,
        }
    }

    #[test]
    fn test_snapshot_change() {
        let candles = vec![candle(dec!(100), 1), candle(dec!(105), 2)];
        let snapshot = PriceSnapshot::from_candles(&candles).unwrap();

        assert_eq!(snapshot.last_close, dec!(105));
        assert_eq!(snapshot.change(), Some(dec!(5)));
        assert_eq!(snapshot.change_pct(), Some(dec!(5)));
        assert_eq!(snapshot.timestamp, 2);
    }

    #[test]
    fn test_snapshot_single_candle_has_no_change() {
        let snapshot = PriceSnapshot::from_candles(&[candle(dec!(42), 1)]).unwrap();
        assert_eq!(snapshot.previous_close, None);
        assert_eq!(snapshot.change_pct(), None);
    }

    #[test]
    fn test_snapshot_empty_and_zero_previous() {
        assert!(PriceSnapshot::from_candles(&[]).is_none());

        let candles = vec![candle(dec!(0), 1), candle(dec!(3), 2)];
        let snapshot = PriceSnapshot::from_candles(&candles).unwrap();
        assert_eq!(snapshot.change(), Some(dec!(3)));
        assert_eq!(snapshot.change_pct(), None);
    }
}
