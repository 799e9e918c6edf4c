// Market data processing modules
pub mod indicators;
