use crate::application::analysis::{AnalysisReport, AnalysisRequest, AnalysisService};
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{debug, error, info};

#[derive(Debug)]
pub enum AnalysisCommand {
    Analyze(AnalysisRequest),
    Shutdown,
}

/// Worker output, consumed by the dashboard
#[derive(Debug, Clone)]
pub enum AnalysisEvent {
    Started(AnalysisRequest),
    Completed(Box<AnalysisReport>),
    Failed {
        request: AnalysisRequest,
        error: String,
    },
}

impl AnalysisEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            AnalysisEvent::Started(request) => request.id,
            AnalysisEvent::Completed(report) => report.request.id,
            AnalysisEvent::Failed { request, .. } => request.id,
        }
    }
}

/// Runs analyses one at a time. Requests that were superseded while the
/// worker was busy are dropped unprocessed.
pub struct AnalysisWorker {
    service: Arc<AnalysisService>,
    cmd_rx: Receiver<AnalysisCommand>,
    event_tx: Sender<AnalysisEvent>,
}

impl AnalysisWorker {
    pub fn new(
        service: Arc<AnalysisService>,
        cmd_rx: Receiver<AnalysisCommand>,
        event_tx: Sender<AnalysisEvent>,
    ) -> Self {
        Self {
            service,
            cmd_rx,
            event_tx,
        }
    }

    pub async fn run(&mut self) {
        info!("AnalysisWorker started");

        while let Some(cmd) = self.cmd_rx.recv().await {
            let request = match cmd {
                AnalysisCommand::Analyze(request) => request,
                AnalysisCommand::Shutdown => break,
            };

            let Some(request) = self.latest_pending(request) else {
                break;
            };

            if self
                .event_tx
                .send(AnalysisEvent::Started(request.clone()))
                .await
                .is_err()
            {
                break;
            }

            let event = match self.service.analyze(&request).await {
                Ok(report) => AnalysisEvent::Completed(Box::new(report)),
                Err(e) => {
                    error!("AnalysisWorker: #{} {} failed: {:#}", request.id, request.symbol, e);
                    AnalysisEvent::Failed {
                        error: format!("{:#}", e),
                        request,
                    }
                }
            };

            if let Err(e) = self.event_tx.send(event).await {
                error!("AnalysisWorker: event channel closed: {}", e);
                break;
            }
        }

        info!("AnalysisWorker stopped");
    }

    /// Drains queued commands, keeping only the newest request.
    /// Returns `None` when a shutdown was queued.
    fn latest_pending(&mut self, mut request: AnalysisRequest) -> Option<AnalysisRequest> {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            match cmd {
                AnalysisCommand::Analyze(newer) => {
                    debug!("AnalysisWorker: dropping stale request #{}", request.id);
                    request = newer;
                }
                AnalysisCommand::Shutdown => return None,
            }
        }
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analysis::AnalysisSettings;
    use crate::domain::market::asset_catalog::AssetCatalog;
    use crate::domain::market::lookback::LookbackPeriod;
    use crate::domain::market::timeframe::Timeframe;
    use crate::infrastructure::mock::MockMarketDataService;
    use tokio::sync::mpsc;

    fn request(id: u64, query: &str) -> AnalysisRequest {
        AnalysisRequest::for_asset(
            id,
            AssetCatalog::resolve(query).unwrap(),
            Timeframe::OneDay,
            LookbackPeriod::years(1).unwrap(),
        )
    }

    fn worker(
        market: MockMarketDataService,
    ) -> (AnalysisWorker, Sender<AnalysisCommand>, Receiver<AnalysisEvent>) {
        let service = Arc::new(AnalysisService::new(
            Arc::new(market),
            AnalysisSettings::default(),
        ));
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        (AnalysisWorker::new(service, cmd_rx, event_tx), cmd_tx, event_rx)
    }

    #[tokio::test]
    async fn test_queued_requests_collapse_to_latest() {
        let (mut worker, cmd_tx, mut event_rx) = worker(MockMarketDataService::new());
        cmd_tx
            .send(AnalysisCommand::Analyze(request(1, "BTC-USD")))
            .await
            .unwrap();
        cmd_tx
            .send(AnalysisCommand::Analyze(request(2, "ETH-USD")))
            .await
            .unwrap();
        cmd_tx.send(AnalysisCommand::Shutdown).await.unwrap();

        // Shutdown queued behind both requests: nothing is processed.
        worker.run().await;
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_latest_request_is_processed() {
        let (mut worker, cmd_tx, mut event_rx) = worker(MockMarketDataService::new());
        cmd_tx
            .send(AnalysisCommand::Analyze(request(1, "BTC-USD")))
            .await
            .unwrap();
        cmd_tx
            .send(AnalysisCommand::Analyze(request(2, "Gold")))
            .await
            .unwrap();
        drop(cmd_tx);

        worker.run().await;

        let started = event_rx.recv().await.unwrap();
        assert!(matches!(&started, AnalysisEvent::Started(r) if r.id == 2));
        match event_rx.recv().await.unwrap() {
            AnalysisEvent::Completed(report) => {
                assert_eq!(report.request.symbol, "GC=F");
                assert!(report.prediction().is_some());
            }
            other => panic!("unexpected event: {:?}", other),
        }
        // The worker owns the event sender; the channel closes once it is gone
        drop(worker);
        assert!(event_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_failures_are_reported_not_fatal() {
        let (mut worker, cmd_tx, mut event_rx) = worker(MockMarketDataService::empty());
        cmd_tx
            .send(AnalysisCommand::Analyze(request(7, "AAPL")))
            .await
            .unwrap();
        drop(cmd_tx);

        worker.run().await;

        let _started = event_rx.recv().await.unwrap();
        let failed = event_rx.recv().await.unwrap();
        assert_eq!(failed.request_id(), 7);
        match failed {
            AnalysisEvent::Failed { error, .. } => assert!(error.contains("No data")),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
