// Agent modules: background worker and dashboard state
pub mod agents;

// One fetch -> features -> train -> predict run
pub mod analysis;

// Indicators and labels
pub mod market_data;

// Datasets and classifiers
pub mod ml;

// System orchestrator
pub mod client;
pub mod system;
