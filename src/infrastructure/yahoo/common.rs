use crate::domain::errors::MarketDataError;
use crate::domain::trading::types::Candle;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

// ===== Chart API payload =====

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct ChartEnvelope {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteColumns>,
}

/// Columnar OHLCV arrays, parallel to `ChartResult::timestamp`
#[derive(Debug, Default, Deserialize)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

/// Flattens the nested chart payload into one candle per timestamp.
///
/// Timestamps with any missing OHLC value are skipped (the provider emits
/// nulls for halted sessions). A missing volume is treated as zero, which is
/// what FX and index symbols report. Output is sorted by timestamp.
pub fn flatten_chart_response(
    symbol: &str,
    response: ChartResponse,
) -> Result<Vec<Candle>, MarketDataError> {
    if let Some(error) = response.chart.error {
        return Err(MarketDataError::Provider {
            symbol: symbol.to_string(),
            code: error.code,
            description: error.description,
        });
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut candles = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;

    for (i, &ts) in result.timestamp.iter().enumerate() {
        let open = quote.open.get(i).copied().flatten();
        let high = quote.high.get(i).copied().flatten();
        let low = quote.low.get(i).copied().flatten();
        let close = quote.close.get(i).copied().flatten();
        let volume = quote.volume.get(i).copied().flatten().unwrap_or(0.0);

        let (Some(open), Some(high), Some(low), Some(close)) = (open, high, low, close) else {
            skipped += 1;
            continue;
        };

        candles.push(Candle {
            symbol: symbol.to_string(),
            open: to_decimal(open),
            high: to_decimal(high),
            low: to_decimal(low),
            close: to_decimal(close),
            volume: to_decimal(volume),
            timestamp: ts * 1000,
        });
    }

    candles.sort_by_key(|c| c.timestamp);
    candles.dedup_by_key(|c| c.timestamp);

    if skipped > 0 {
        debug!(
            "Yahoo: skipped {} incomplete rows for {} ({} kept)",
            skipped,
            symbol,
            candles.len()
        );
    }

    Ok(candles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flatten_columns_into_candles() {
        let response = parse(
            r#"{"chart":{"result":[{
                "meta":{"symbol":"GC=F","currency":"USD"},
                "timestamp":[1700000000,1700086400,1700172800],
                "indicators":{"quote":[{
                    "open":[10.0,11.0,null],
                    "high":[12.0,13.5,14.0],
                    "low":[9.5,10.5,11.0],
                    "close":[11.0,13.0,12.0],
                    "volume":[1000,null,3000]
                }]}
            }],"error":null}}"#,
        );

        let candles = flatten_chart_response("GC=F", response).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_700_000_000_000);
        assert_eq!(candles[0].close, dec!(11));
        assert_eq!(candles[1].high, dec!(13.5));
        assert_eq!(candles[1].volume, Decimal::ZERO);
        assert!(candles.iter().all(|c| c.symbol == "GC=F"));
    }

    #[test]
    fn test_provider_error() {
        let response = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        );

        match flatten_chart_response("XXX", response) {
            Err(MarketDataError::Provider { code, .. }) => assert_eq!(code, "Not Found"),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_result() {
        let response = parse(
            r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#,
        );
        assert!(flatten_chart_response("BTC-USD", response).unwrap().is_empty());
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        let response = parse(
            r#"{"chart":{"result":[{
                "timestamp":[300,100,100],
                "indicators":{"quote":[{
                    "open":[3,1,1],"high":[3,1,1],"low":[3,1,1],"close":[3,1,1],"volume":[1,1,1]
                }]}
            }],"error":null}}"#,
        );
        let candles = flatten_chart_response("T", response).unwrap();
        let ts: Vec<i64> = candles.iter().map(|c| c.timestamp).collect();
        assert_eq!(ts, vec![100_000, 300_000]);
    }
}
