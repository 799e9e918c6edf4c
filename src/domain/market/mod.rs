pub mod asset_catalog;
pub mod lookback;
pub mod timeframe;
