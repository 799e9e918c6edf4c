use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::application::agents::analysis_worker::{AnalysisCommand, AnalysisEvent, AnalysisWorker};
use crate::application::analysis::{AnalysisService, AnalysisSettings};
use crate::config::Config;
use crate::domain::ports::MarketDataService;
use crate::infrastructure::ServiceFactory;

const COMMAND_BUFFER: usize = 32;
const EVENT_BUFFER: usize = 32;

pub struct SystemHandle {
    pub analysis_cmd_tx: mpsc::Sender<AnalysisCommand>,
    pub event_rx: mpsc::Receiver<AnalysisEvent>,
    pub provider_name: String,
    pub settings: AnalysisSettings,
}

pub struct Application {
    pub config: Config,
    pub market_service: Arc<dyn MarketDataService>,
    pub analysis_service: Arc<AnalysisService>,
}

impl Application {
    pub fn build(config: Config) -> Result<Self> {
        info!("Building Trader Sentinel (Mode: {:?})...", config.mode);
        let market_service = ServiceFactory::create_market_data_service(&config);
        Ok(Self::with_market_service(config, market_service))
    }

    /// Same as `build`, with an explicit market data provider.
    pub fn with_market_service(config: Config, market_service: Arc<dyn MarketDataService>) -> Self {
        let settings = config.analysis_settings();
        info!(
            "Analysis settings: features={:?}, rsi_period={}, min_training_rows={}, trees={}, seed={}",
            settings.feature_set,
            settings.rsi_period,
            settings.min_training_rows,
            settings.forest.n_trees,
            settings.forest.seed
        );
        let analysis_service = Arc::new(AnalysisService::new(market_service.clone(), settings));

        Self {
            config,
            market_service,
            analysis_service,
        }
    }

    /// Spawns the analysis worker. Must be called inside a tokio runtime.
    pub async fn start(self) -> Result<SystemHandle> {
        info!("Starting AnalysisWorker...");
        let (analysis_cmd_tx, analysis_cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);

        let mut worker = AnalysisWorker::new(self.analysis_service.clone(), analysis_cmd_rx, event_tx);
        tokio::spawn(async move {
            worker.run().await;
        });

        Ok(SystemHandle {
            analysis_cmd_tx,
            event_rx,
            provider_name: self.market_service.provider_name().to_string(),
            settings: *self.analysis_service.settings(),
        })
    }
}
