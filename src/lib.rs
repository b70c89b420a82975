pub mod cli;
pub mod core;
pub mod providers;

use anyhow::Result;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Snapshot,
    Live,
    History {
        base: Option<String>,
        days: Option<usize>,
        json: bool,
    },
    Zodiac {
        year: i32,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxview starting...");

    let config = match config_path {
        Some(path) => crate::core::config::AppConfig::load_from_path(path)?,
        None => crate::core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Snapshot => cli::snapshot::run(&config.snapshot_path()?),
        AppCommand::Zodiac { year } => cli::zodiac::run(year),
        AppCommand::Live => {
            let provider = rate_provider(&config)?;
            cli::live::run(&provider, &config.live).await
        }
        AppCommand::History { base, days, json } => {
            let provider = rate_provider(&config)?;
            cli::history::run(&provider, &config.history, base.as_deref(), days, json).await
        }
    }
}

fn rate_provider(
    config: &crate::core::config::AppConfig,
) -> Result<providers::exchange_rate::ExchangeRateProvider> {
    let client = providers::http_client(&config.provider)?;
    Ok(providers::exchange_rate::ExchangeRateProvider::new(
        &config.provider.base_url,
        client,
    ))
}
