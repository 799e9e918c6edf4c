//! Market-data provider configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Yahoo Finance chart API configuration
#[derive(Debug, Clone)]
pub struct ProviderEnvConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl ProviderEnvConfig {
    pub fn from_env() -> Result<Self> {
        let timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .context("Failed to parse HTTP_TIMEOUT_SECS")?;
        let max_retries = env::var("HTTP_MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u32>()
            .context("Failed to parse HTTP_MAX_RETRIES")?;

        Ok(Self {
            base_url: env::var("YAHOO_BASE_URL")
                .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
            timeout: Duration::from_secs(timeout_secs),
            max_retries,
        })
    }
}
