//! Configuration module for Trader Sentinel.
//!
//! Every setting has a default, so the dashboard runs with no environment at
//! all. Values are read from the process environment (and `.env` if the
//! binary loaded it) and grouped by concern: provider and model.

mod model_config;
mod provider_config;

pub use model_config::ModelEnvConfig;
pub use provider_config::ProviderEnvConfig;

use crate::application::analysis::AnalysisSettings;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Where price data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Yahoo,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "yahoo" | "live" => Ok(Mode::Yahoo),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'mock' or 'yahoo'", s),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub provider: ProviderEnvConfig,
    pub model: ModelEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("MODE").unwrap_or_else(|_| "yahoo".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let provider = ProviderEnvConfig::from_env().context("Failed to load provider config")?;
        let model = ModelEnvConfig::from_env().context("Failed to load model config")?;

        Ok(Self {
            mode,
            provider,
            model,
        })
    }

    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            feature_set: self.model.feature_set,
            rsi_period: self.model.rsi_period,
            min_training_rows: self.model.min_training_rows,
            forest: self.model.forest,
        }
    }
}
