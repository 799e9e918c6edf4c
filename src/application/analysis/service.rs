use super::{AnalysisOutcome, AnalysisReport, AnalysisRequest, AnalysisSettings};
use crate::application::ml::dataset::{DatasetBuilder, TrainingSet};
use crate::application::ml::predictor::DirectionClassifier;
use crate::application::ml::smartcore_predictor::SmartCorePredictor;
use crate::domain::errors::{MarketDataError, PredictionError};
use crate::domain::ports::MarketDataService;
use crate::domain::trading::types::PriceSnapshot;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct AnalysisService {
    market_service: Arc<dyn MarketDataService>,
    settings: AnalysisSettings,
}

impl AnalysisService {
    pub fn new(market_service: Arc<dyn MarketDataService>, settings: AnalysisSettings) -> Self {
        Self {
            market_service,
            settings,
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Runs the full pipeline for one request. A fresh model is trained every time.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        let started = Instant::now();
        info!(
            "AnalysisService: #{} {} ({}) timeframe={} lookback={}",
            request.id, request.name, request.symbol, request.timeframe, request.lookback
        );

        let candles = self
            .market_service
            .get_price_history(&request.symbol, request.lookback, request.timeframe)
            .await
            .with_context(|| format!("Failed to fetch price history for {}", request.symbol))?;

        if candles.is_empty() {
            return Err(MarketDataError::NoData {
                symbol: request.symbol.clone(),
                range: request.lookback.to_range_param(request.timeframe),
                interval: request.timeframe.to_string(),
            }
            .into());
        }

        let builder = DatasetBuilder::new(self.settings.feature_set, self.settings.rsi_period);
        let training_set = builder.build(&candles)?;
        let snapshot = PriceSnapshot::from_candles(&candles);
        let latest_rsi = training_set.latest_rsi();
        let training_rows = training_set.len();

        let settings = self.settings;
        let (outcome, model_name) =
            tokio::task::spawn_blocking(move || train_and_predict(&settings, &training_set))
                .await
                .context("Training task panicked")??;

        let elapsed_ms = started.elapsed().as_millis();
        match &outcome {
            AnalysisOutcome::Predicted(p) => info!(
                "AnalysisService: #{} {} -> {} ({:.2}%) in {}ms",
                request.id,
                request.symbol,
                p.direction,
                p.confidence_pct(),
                elapsed_ms
            ),
            AnalysisOutcome::InsufficientData { rows, required } => warn!(
                "AnalysisService: #{} {} skipped training: {} rows (need more than {})",
                request.id, request.symbol, rows, required
            ),
        }

        Ok(AnalysisReport {
            request: request.clone(),
            candles,
            snapshot,
            latest_rsi,
            training_rows,
            outcome,
            model_name,
            elapsed_ms,
        })
    }
}

/// Applies the data-length guard, then fits and scores a new classifier.
pub fn train_and_predict(
    settings: &AnalysisSettings,
    training_set: &TrainingSet,
) -> Result<(AnalysisOutcome, String), PredictionError> {
    let mut classifier = SmartCorePredictor::new(settings.forest);
    let model_name = classifier.name().to_string();

    if training_set.len() <= settings.min_training_rows {
        return Ok((
            AnalysisOutcome::InsufficientData {
                rows: training_set.len(),
                required: settings.min_training_rows,
            },
            model_name,
        ));
    }

    let latest = training_set
        .latest
        .as_ref()
        .ok_or(PredictionError::NoScorableRow)?;

    classifier.fit(training_set)?;
    let prediction = classifier.predict(latest)?;

    Ok((AnalysisOutcome::Predicted(prediction), model_name))
}
