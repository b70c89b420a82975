pub mod exchange_rate;

use crate::core::config::ProviderConfig;
use anyhow::{Context, Result};
use std::time::Duration;

/// Shared HTTP client for one command run.
pub fn http_client(config: &ProviderConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}
