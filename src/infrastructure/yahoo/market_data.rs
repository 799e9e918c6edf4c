use super::common::{ChartResponse, flatten_chart_response};
use crate::domain::errors::MarketDataError;
use crate::domain::market::lookback::LookbackPeriod;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ports::MarketDataService;
use crate::domain::trading::types::Candle;
use crate::infrastructure::core::http_client_factory::{
    HttpClientFactory, build_url_with_query, encode_component,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use std::time::Duration;
use tracing::{debug, error, info};

// ===== Market Data Service (Chart API) =====

pub struct YahooMarketDataService {
    client: ClientWithMiddleware,
    base_url: String,
}

impl YahooMarketDataService {
    pub fn new(base_url: String, timeout: Duration, max_retries: u32) -> Self {
        Self {
            client: HttpClientFactory::create_client(timeout, max_retries),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn chart_url(&self, symbol: &str, lookback: LookbackPeriod, timeframe: Timeframe) -> String {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, encode_component(symbol));
        build_url_with_query(
            &url,
            &[
                ("range", lookback.to_range_param(timeframe)),
                ("interval", timeframe.to_yahoo_string().to_string()),
                ("includePrePost", "false".to_string()),
                ("events", "div,splits".to_string()),
            ],
        )
    }
}

#[async_trait]
impl MarketDataService for YahooMarketDataService {
    async fn get_price_history(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>> {
        let url = self.chart_url(symbol, lookback, timeframe);
        debug!("YahooMarketDataService: GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch chart from Yahoo")?;

        let status = response.status();
        // Error payloads (e.g. 404 for unknown symbols) still carry a chart.error body.
        let body = response
            .text()
            .await
            .context("Failed to read chart response")?;

        let parsed: ChartResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!(
                    "YahooMarketDataService: API error {} for {}: {}",
                    status, symbol, body
                );
                anyhow::bail!("Yahoo API error ({}): {}", status, e);
            }
        };

        let candles = flatten_chart_response(symbol, parsed)?;
        if candles.is_empty() {
            return Err(MarketDataError::NoData {
                symbol: symbol.to_string(),
                range: lookback.to_range_param(timeframe),
                interval: timeframe.to_string(),
            }
            .into());
        }

        info!(
            "YahooMarketDataService: fetched {} {} bars for {}",
            candles.len(),
            timeframe,
            symbol
        );
        Ok(candles)
    }

    fn provider_name(&self) -> &str {
        "Yahoo Finance"
    }
}
