// Instruments, timeframes and lookback windows
pub mod market;

// Feature rows and predictions
pub mod ml;

// Port interfaces
pub mod ports;

// Price series types
pub mod trading;

// Domain-specific error types
pub mod errors;
