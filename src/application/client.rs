use crate::application::agents::analysis_worker::{AnalysisCommand, AnalysisEvent};
use crate::application::analysis::{AnalysisRequest, AnalysisSettings};
use crate::application::system::SystemHandle;
use anyhow::Result;
use crossbeam_channel::Receiver;

/// Unified event type for the User Interface
#[derive(Clone, Debug)]
pub enum SystemEvent {
    Analysis(AnalysisEvent),
    Log(String),
}

/// A client interface for interacting with the analysis system.
/// Abstracts away channel management for the UI/UserAgent.
pub struct SystemClient {
    log_rx: Receiver<String>,
    handle: SystemHandle,
}

impl SystemClient {
    pub fn new(handle: SystemHandle, log_rx: Receiver<String>) -> Self {
        Self { handle, log_rx }
    }

    /// Poll for the next available event. Non-blocking.
    pub fn poll_next(&mut self) -> Option<SystemEvent> {
        // Analysis results first so a burst of logs cannot delay them
        if let Ok(event) = self.handle.event_rx.try_recv() {
            return Some(SystemEvent::Analysis(event));
        }

        if let Ok(msg) = self.log_rx.try_recv() {
            return Some(SystemEvent::Log(msg));
        }

        None
    }

    pub fn request_analysis(&self, request: AnalysisRequest) -> Result<()> {
        self.handle
            .analysis_cmd_tx
            .try_send(AnalysisCommand::Analyze(request))
            .map_err(|e| anyhow::anyhow!("Failed to send analysis request: {}", e))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.handle
            .analysis_cmd_tx
            .try_send(AnalysisCommand::Shutdown)
            .map_err(|e| anyhow::anyhow!("Failed to send shutdown command: {}", e))
    }

    pub fn provider_name(&self) -> &str {
        &self.handle.provider_name
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.handle.settings
    }
}
