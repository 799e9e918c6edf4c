//! One analysis run: fetch -> features/labels -> train -> predict.

pub mod service;

use crate::application::ml::smartcore_predictor::ForestParameters;
use crate::domain::market::asset_catalog::Asset;
use crate::domain::market::lookback::LookbackPeriod;
use crate::domain::market::timeframe::Timeframe;
use crate::domain::ml::feature_registry::FeatureSet;
use crate::domain::ml::prediction::Prediction;
use crate::domain::trading::types::{Candle, PriceSnapshot};
use serde::Serialize;

pub use service::AnalysisService;

/// User selection driving a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    /// Monotonic id so stale results can be told apart
    pub id: u64,
    pub name: String,
    pub symbol: String,
    pub timeframe: Timeframe,
    pub lookback: LookbackPeriod,
}

impl AnalysisRequest {
    pub fn for_asset(id: u64, asset: &Asset, timeframe: Timeframe, lookback: LookbackPeriod) -> Self {
        Self {
            id,
            name: asset.name.to_string(),
            symbol: asset.symbol.to_string(),
            timeframe,
            lookback,
        }
    }
}

/// Pipeline knobs shared by every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisSettings {
    pub feature_set: FeatureSet,
    pub rsi_period: usize,
    /// Training requires strictly more cleaned rows than this
    pub min_training_rows: usize,
    pub forest: ForestParameters,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            feature_set: FeatureSet::WithRsi,
            rsi_period: 14,
            min_training_rows: 50,
            forest: ForestParameters::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnalysisOutcome {
    Predicted(Prediction),
    /// Training skipped: not enough cleaned rows
    InsufficientData { rows: usize, required: usize },
}

/// Everything the dashboard renders for one run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub request: AnalysisRequest,
    pub candles: Vec<Candle>,
    pub snapshot: Option<PriceSnapshot>,
    pub latest_rsi: Option<f64>,
    pub training_rows: usize,
    pub outcome: AnalysisOutcome,
    pub model_name: String,
    pub elapsed_ms: u128,
}

impl AnalysisReport {
    pub fn prediction(&self) -> Option<&Prediction> {
        match &self.outcome {
            AnalysisOutcome::Predicted(p) => Some(p),
            AnalysisOutcome::InsufficientData { .. } => None,
        }
    }
}
