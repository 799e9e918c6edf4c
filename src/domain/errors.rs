use thiserror::Error;

/// Errors related to market data retrieval
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("No data returned for {symbol} (range={range}, interval={interval})")]
    NoData {
        symbol: String,
        range: String,
        interval: String,
    },

    #[error("Provider error for {symbol}: {code} - {description}")]
    Provider {
        symbol: String,
        code: String,
        description: String,
    },

    #[error("Invalid market data for {symbol}: {reason}")]
    InvalidData { symbol: String, reason: String },

    #[error("Unknown asset: {name}")]
    UnknownAsset { name: String },
}

/// Errors raised while building datasets, training or scoring the classifier
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Insufficient training data: {rows} usable rows (need more than {required})")]
    InsufficientData { rows: usize, required: usize },

    #[error("No scorable row: the latest candles are still inside the indicator warm-up")]
    NoScorableRow,

    #[error("Invalid model parameters: {reason}")]
    InvalidParameters { reason: String },

    #[error("Model has not been trained")]
    NotTrained,

    #[error("Training failed: {reason}")]
    TrainingFailed { reason: String },

    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },
}
