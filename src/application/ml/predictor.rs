use super::dataset::TrainingSet;
use crate::domain::errors::PredictionError;
use crate::domain::ml::feature_registry::FeatureRow;
use crate::domain::ml::prediction::Prediction;

/// Interface for next-period direction classifiers
pub trait DirectionClassifier: Send + Sync {
    /// Train from scratch on a cleaned training set, replacing any previous model
    fn fit(&mut self, data: &TrainingSet) -> Result<(), PredictionError>;

    /// Classify a single feature row
    fn predict(&self, row: &FeatureRow) -> Result<Prediction, PredictionError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
