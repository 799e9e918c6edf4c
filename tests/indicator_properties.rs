use trader_sentinel::application::market_data::indicators::{
    DEFAULT_RSI_PERIOD, direction_labels, relative_strength_index,
};
use trader_sentinel::application::ml::dataset::DatasetBuilder;
use trader_sentinel::domain::market::lookback::LookbackPeriod;
use trader_sentinel::domain::market::timeframe::Timeframe;
use trader_sentinel::domain::ml::feature_registry::FeatureSet;
use trader_sentinel::domain::ports::MarketDataService;
use trader_sentinel::domain::trading::types::Candle;
use trader_sentinel::infrastructure::mock::MockMarketDataService;

fn mock_candles(symbol: &str, timeframe: Timeframe) -> Vec<Candle> {
    let service = MockMarketDataService::new();
    tokio_test::block_on(service.get_price_history(symbol, LookbackPeriod::default(), timeframe))
        .unwrap()
}

#[test]
fn test_rsi_stays_in_range_after_warmup() {
    for symbol in ["BTC-USD", "GC=F", "IDR=X", "BBCA.JK"] {
        let closes: Vec<f64> = mock_candles(symbol, Timeframe::OneDay)
            .iter()
            .map(Candle::close_f64)
            .collect();
        let rsi = relative_strength_index(&closes, DEFAULT_RSI_PERIOD).unwrap();

        assert_eq!(rsi.len(), closes.len());
        assert!(rsi[..DEFAULT_RSI_PERIOD].iter().all(Option::is_none));
        for value in rsi[DEFAULT_RSI_PERIOD..].iter().flatten() {
            assert!(
                (0.0..=100.0).contains(value),
                "{} RSI out of range: {}",
                symbol,
                value
            );
        }
    }
}

#[test]
fn test_cleaned_labels_are_binary_and_complete() {
    let candles = mock_candles("ETH-USD", Timeframe::OneWeek);
    let set = DatasetBuilder::new(FeatureSet::WithRsi, DEFAULT_RSI_PERIOD)
        .build(&candles)
        .unwrap();

    assert_eq!(set.rows.len(), set.labels.len());
    assert!(set.labels.iter().all(|l| *l == 0 || *l == 1));
    assert!(set.rows.iter().all(|r| r.rsi.is_some()));
    assert_eq!(set.rows.len() + set.dropped, candles.len());

    // The scored row is the last labelled row, one candle before the end
    let latest = set.latest.as_ref().unwrap();
    assert_eq!(latest, set.rows.last().unwrap());
    assert_eq!(latest.timestamp, candles[candles.len() - 2].timestamp);
}

#[test]
fn test_labels_match_next_close() {
    let closes: Vec<f64> = mock_candles("SOL-USD", Timeframe::OneDay)
        .iter()
        .map(Candle::close_f64)
        .collect();
    let labels = direction_labels(&closes);

    assert_eq!(labels.last(), Some(&None));
    for (i, label) in labels.iter().enumerate().take(closes.len() - 1) {
        let expected = u32::from(closes[i + 1] > closes[i]);
        assert_eq!(*label, Some(expected));
    }
}
