use crate::domain::market::lookback::LookbackPeriod;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::trading::types::Candle;
use anyhow::Result;
use async_trait::async_trait;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketDataService: Send + Sync {
    /// Fetch the OHLCV history for `symbol`, ordered by timestamp (oldest first).
    async fn get_price_history(
        &self,
        symbol: &str,
        lookback: LookbackPeriod,
        timeframe: Timeframe,
    ) -> Result<Vec<Candle>>;

    /// Short provider name for logs and the status bar
    fn provider_name(&self) -> &str;
}
