//! Indicator and classifier configuration parsing from environment variables.

use crate::application::ml::smartcore_predictor::ForestParameters;
use crate::domain::ml::feature_registry::FeatureSet;
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Model environment configuration
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub feature_set: FeatureSet,
    pub rsi_period: usize,
    pub min_training_rows: usize,
    pub forest: ForestParameters,
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let feature_set_str = env::var("FEATURE_SET").unwrap_or_else(|_| "with_rsi".to_string());
        let feature_set = FeatureSet::from_str(&feature_set_str)?;

        let rsi_period = Self::parse_usize("RSI_PERIOD", 14)?;
        if rsi_period < 2 {
            anyhow::bail!("RSI_PERIOD must be at least 2, got {}", rsi_period);
        }

        let forest = ForestParameters {
            n_trees: env::var("MODEL_N_TREES")
                .unwrap_or_else(|_| "100".to_string())
                .parse::<u16>()
                .context("Failed to parse MODEL_N_TREES")?,
            min_samples_split: Self::parse_usize("MODEL_MIN_SAMPLES_SPLIT", 100)?,
            seed: env::var("MODEL_SEED")
                .unwrap_or_else(|_| "1".to_string())
                .parse::<u64>()
                .context("Failed to parse MODEL_SEED")?,
        };
        forest.validate()?;

        Ok(Self {
            feature_set,
            rsi_period,
            min_training_rows: Self::parse_usize("MIN_TRAINING_ROWS", 50)?,
            forest,
        })
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }
}
