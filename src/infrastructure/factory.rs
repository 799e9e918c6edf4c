use crate::config::{Config, Mode};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::mock::MockMarketDataService;
use crate::infrastructure::yahoo::YahooMarketDataService;
use std::sync::Arc;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_market_data_service(config: &Config) -> Arc<dyn MarketDataService> {
        let service: Arc<dyn MarketDataService> = match config.mode {
            Mode::Mock => Arc::new(MockMarketDataService::new()),
            Mode::Yahoo => Arc::new(YahooMarketDataService::new(
                config.provider.base_url.clone(),
                config.provider.timeout,
                config.provider.max_retries,
            )),
        };
        info!(
            "ServiceFactory: market data provider = {}",
            service.provider_name()
        );
        service
    }
}
