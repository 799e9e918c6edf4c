use crate::domain::market::lookback::LookbackPeriod;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataService;
use crate::domain::trading::types::Candle;
use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::info;

// Fixed end of the synthetic series: 2024-01-01T00:00:00Z
const SERIES_END_MS: i64 = 1_704_067_200_000;
const MAX_SYNTHETIC_BARS: usize = 5_000;

#[derive(Debug, Clone, Default)]
enum MockSeries {
    /// Seeded random walk, one seed per symbol
    #[default]
    RandomWalk,
    /// Fixed close prices, oldest first
    Fixed(Vec<f64>),
    /// Provider answers with no rows
    Empty,
}

/// Offline market data: deterministic synthetic OHLCV series.
#[derive(Debug, Clone, Default)]
pub struct MockMarketDataService {
    series: MockSeries,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixed_closes(closes: Vec<f64>) -> Self {
        Self {
            series: MockSeries::Fixed(closes),
        }
    }

    pub fn empty() -> Self {
        Self {
            series: MockSeries::Empty,
        }
    }

    fn bar_count(lookback: LookbackPeriod, timeframe: Timeframe) -> usize {
        let mut days = usize::from(lookback.as_years()) * 365;
        if let Some(max_days) = timeframe.max_lookback_days() {
            days = days.min(max_days as usize);
        }
        let bars = days * 1440 / timeframe.to_minutes();
        bars.clamp(1, MAX_SYNTHETIC_BARS)
    }

    fn base_price(symbol: &str) -> f64 {
        if symbol.contains("BTC") {
            42000.0
        } else if symbol.contains("ETH") {
            2300.0
        } else if symbol.contains("IDR") {
            15500.0
        } else if symbol.starts_with("GC") {
            2050.0
        } else {
            150.0
        }
    }

    fn seed_for(symbol: &str) -> u64 {
        symbol
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325u64, |h, b| {
                (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
            })
    }

    fn random_walk(symbol: &str, count: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(Self::seed_for(symbol));
        let mut price = Self::base_price(symbol);
        (0..count)
            .map(|_| {
                let ret: f64 = rng.random_range(-0.02..0.021);
                price = (price * (1.0 + ret)).max(0.01);
                price
            })
            .collect()
    }

    fn candles_from_closes(symbol: &str, closes: &[f64], timeframe: Timeframe) -> Vec<Candle> {
        let step_ms = timeframe.to_seconds() * 1000;
        let start_ms = SERIES_END_MS - step_ms * closes.len() as i64;
        let dec = |v: f64| Decimal::from_f64(v).unwrap_or(Decimal::ZERO);

        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let open = if i == 0 { close } else { closes[i - 1] };
                let wick = close.abs() * 0.004;
                Candle {
                    symbol: symbol.to_string(),
                    open: dec(open),
                    high: dec(open.max(close) + wick),
                    low: dec(open.min(close) - wick),
                    close: dec(close),
                    volume: dec(1_000.0 + (i % 17) as f64 * 250.0),
                    timestamp: start_ms + step_ms * i as i64,
                }
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn get_price_history(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>> {
        let closes = match &self.series {
            MockSeries::RandomWalk => {
                Self::random_walk(symbol, Self::bar_count(lookback, timeframe))
            }
            MockSeries::Fixed(closes) => closes.clone(),
            MockSeries::Empty => Vec::new(),
        };

        info!(
            "MockMarketDataService: generated {} {} bars for {}",
            closes.len(),
            timeframe,
            symbol
        );
        Ok(Self::candles_from_closes(symbol, &closes, timeframe))
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_random_walk_is_deterministic_per_symbol() {
        let service = MockMarketDataService::new();
        let a = service
            .get_price_history("BTC-USD", LookbackPeriod::default(), Timeframe::OneDay)
            .await
            .unwrap();
        let b = service
            .get_price_history("BTC-USD", LookbackPeriod::default(), Timeframe::OneDay)
            .await
            .unwrap();
        let other = service
            .get_price_history("ETH-USD", LookbackPeriod::default(), Timeframe::OneDay)
            .await
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 730);
        assert_ne!(a[10].close, other[10].close);
    }

    #[tokio::test]
    async fn test_candles_are_ordered_and_consistent() {
        let service = MockMarketDataService::new();
        let candles = service
            .get_price_history("GC=F", LookbackPeriod::default(), Timeframe::OneWeek)
            .await
            .unwrap();

        assert_eq!(candles.len(), 104);
        for pair in candles.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        for c in &candles {
            assert!(c.low <= c.open.min(c.close));
            assert!(c.high >= c.open.max(c.close));
        }
    }

    #[tokio::test]
    async fn test_fixed_and_empty_series() {
        let fixed = MockMarketDataService::with_fixed_closes(vec![1.0, 2.0, 3.0]);
        let candles = fixed
            .get_price_history("T", LookbackPeriod::default(), Timeframe::OneDay)
            .await
            .unwrap();
        assert_eq!(candles.len(), 3);
        assert_eq!(candles[2].timestamp, SERIES_END_MS - 86_400_000);

        let empty = MockMarketDataService::empty();
        assert!(
            empty
                .get_price_history("T", LookbackPeriod::default(), Timeframe::OneDay)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_hourly_bar_count_is_capped() {
        let five_years = LookbackPeriod::years(5).unwrap();
        assert_eq!(
            MockMarketDataService::bar_count(five_years, Timeframe::OneHour),
            MAX_SYNTHETIC_BARS
        );
        assert_eq!(
            MockMarketDataService::bar_count(LookbackPeriod::default(), Timeframe::OneDay),
            730
        );
    }
}
