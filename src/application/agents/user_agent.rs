use crate::application::agents::analysis_worker::AnalysisEvent;
use crate::application::analysis::{AnalysisReport, AnalysisRequest};
use crate::application::client::{SystemClient, SystemEvent};
use crate::domain::market::asset_catalog::{Asset, AssetCatalog, AssetCategory};
use crate::domain::market::lookback::LookbackPeriod;
use crate::domain::market::timeframe::Timeframe;
use std::collections::VecDeque;
use tracing::{debug, warn};

const MAX_LOG_LINES: usize = 500;
const MAX_EVENTS_PER_FRAME: usize = 200;

/// Dashboard state: the user's selections plus the latest worker output.
///
/// Every selection change submits a fresh request. Only events carrying the
/// id of the newest request are applied, so a slow stale run can never
/// overwrite the view of the current selection.
pub struct UserAgent {
    client: SystemClient,

    // Selections
    pub category_index: usize,
    pub asset_index: usize,
    pub timeframe: Timeframe,
    pub lookback: LookbackPeriod,
    /// Slider position; committed to `lookback` when the drag ends
    pub lookback_slider: u8,

    // Results
    next_request_id: u64,
    in_flight: Option<AnalysisRequest>,
    pub latest_report: Option<AnalysisReport>,
    pub last_error: Option<String>,

    // Log panel
    pub logs: VecDeque<String>,
    pub log_level_filter: Option<String>, // None = All, Some("INFO"), Some("WARN"), Some("ERROR")
}

impl UserAgent {
    pub fn new(client: SystemClient) -> Self {
        Self {
            client,
            category_index: 0,
            asset_index: 0,
            timeframe: Timeframe::default(),
            lookback: LookbackPeriod::default(),
            lookback_slider: LookbackPeriod::default().as_years(),
            next_request_id: 1,
            in_flight: None,
            latest_report: None,
            last_error: None,
            logs: VecDeque::new(),
            log_level_filter: None,
        }
    }

    pub fn client(&self) -> &SystemClient {
        &self.client
    }

    pub fn current_category(&self) -> &'static AssetCategory {
        let categories = AssetCatalog::categories();
        &categories[self.category_index.min(categories.len() - 1)]
    }

    pub fn current_asset(&self) -> &'static Asset {
        let assets = self.current_category().assets;
        &assets[self.asset_index.min(assets.len() - 1)]
    }

    pub fn select_category(&mut self, index: usize) {
        if index != self.category_index && index < AssetCatalog::categories().len() {
            self.category_index = index;
            self.asset_index = 0;
            self.submit_analysis();
        }
    }

    pub fn select_asset(&mut self, index: usize) {
        if index != self.asset_index && index < self.current_category().assets.len() {
            self.asset_index = index;
            self.submit_analysis();
        }
    }

    pub fn select_timeframe(&mut self, timeframe: Timeframe) {
        if timeframe != self.timeframe {
            self.timeframe = timeframe;
            self.submit_analysis();
        }
    }

    pub fn select_lookback_years(&mut self, years: u8) {
        match LookbackPeriod::years(years) {
            Ok(lookback) if lookback != self.lookback => {
                self.lookback = lookback;
                self.lookback_slider = years;
                self.submit_analysis();
            }
            Ok(_) => {}
            Err(e) => warn!("UserAgent: ignoring lookback selection: {}", e),
        }
    }

    /// Builds a request for the current selection and hands it to the worker.
    pub fn submit_analysis(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;

        let request =
            AnalysisRequest::for_asset(id, self.current_asset(), self.timeframe, self.lookback);
        debug!("UserAgent: submitting request #{} for {}", id, request.symbol);

        match self.client.request_analysis(request.clone()) {
            Ok(()) => {
                self.in_flight = Some(request);
                self.last_error = None;
            }
            Err(e) => {
                self.in_flight = None;
                self.last_error = Some(e.to_string());
            }
        }
        id
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&AnalysisRequest> {
        self.in_flight.as_ref()
    }

    /// Drains pending events. Called once per frame.
    pub fn poll(&mut self) {
        for _ in 0..MAX_EVENTS_PER_FRAME {
            match self.client.poll_next() {
                Some(SystemEvent::Analysis(event)) => self.apply_event(event),
                Some(SystemEvent::Log(line)) => self.push_log(line),
                None => break,
            }
        }
    }

    fn apply_event(&mut self, event: AnalysisEvent) {
        let current_id = self.next_request_id.saturating_sub(1);
        if event.request_id() != current_id {
            debug!(
                "UserAgent: ignoring event for stale request #{}",
                event.request_id()
            );
            return;
        }

        match event {
            AnalysisEvent::Started(_) => {}
            AnalysisEvent::Completed(report) => {
                self.in_flight = None;
                self.last_error = None;
                self.latest_report = Some(*report);
            }
            AnalysisEvent::Failed { error, .. } => {
                self.in_flight = None;
                self.latest_report = None;
                self.last_error = Some(error);
            }
        }
    }

    fn push_log(&mut self, line: String) {
        if self.logs.len() == MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub fn filtered_logs(&self) -> impl Iterator<Item = &String> {
        self.logs.iter().filter(move |line| match &self.log_level_filter {
            Some(level) => line.contains(level.as_str()),
            None => true,
        })
    }
}
