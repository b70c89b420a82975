use crate::core::currency::CurrencyCode;
use crate::core::history::HistoryMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn codes(list: &[&'static str]) -> Vec<CurrencyCode> {
    list.iter().copied().map(CurrencyCode::from_static).collect()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://open.er-api.com/v6".to_string(),
            timeout_secs: 10,
            user_agent: "fxview/0.1".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LiveConfig {
    pub base: CurrencyCode,
    /// Display order of the live view.
    pub currencies: Vec<CurrencyCode>,
}

impl Default for LiveConfig {
    fn default() -> Self {
        LiveConfig {
            base: CurrencyCode::from_static("JPY"),
            currencies: codes(&["USD", "EUR", "GBP", "AUD", "CAD", "CHF", "CNY"]),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    pub targets: Vec<CurrencyCode>,
    pub window_size: usize,
    pub max_concurrency: usize,
    pub mode: HistoryMode,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            targets: codes(&["USD", "EUR", "GBP", "AUD", "CNY"]),
            window_size: 5,
            max_concurrency: 4,
            mode: HistoryMode::Dated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub live: LiveConfig,
    pub history: HistoryConfig,
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when absent.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxview", "fxview")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn snapshot_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.snapshot.path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "fxview", "fxview")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join("rates.csv"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/rates"
live:
  base: "jpy"
  currencies: ["usd", "EUR"]
history:
  targets: ["USD", "eur", "AUD"]
  window_size: 7
  mode: latest
snapshot:
  path: "/tmp/rates.csv"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://example.com/rates");
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.live.base.as_str(), "JPY");
        assert_eq!(
            config.live.currencies,
            vec![
                CurrencyCode::parse("USD").unwrap(),
                CurrencyCode::parse("EUR").unwrap()
            ]
        );
        assert_eq!(config.history.targets.len(), 3);
        assert_eq!(config.history.targets[1].as_str(), "EUR");
        assert_eq!(config.history.window_size, 7);
        assert_eq!(config.history.max_concurrency, 4);
        assert_eq!(config.history.mode, HistoryMode::Latest);
        assert_eq!(
            config.snapshot_path().unwrap(),
            PathBuf::from("/tmp/rates.csv")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.live.base.as_str(), "JPY");
        assert_eq!(config.live.currencies.len(), 7);
        assert_eq!(config.history.window_size, 5);
        assert_eq!(config.history.mode, HistoryMode::Dated);
        assert_eq!(config.provider.base_url, "https://open.er-api.com/v6");
    }

    #[test]
    fn test_invalid_currency_is_rejected() {
        let yaml_str = r#"
history:
  targets: ["USD", "  "]
"#;
        assert!(serde_yaml::from_str::<AppConfig>(yaml_str).is_err());
    }

    #[test]
    fn test_load_from_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "live:\n  base: usd\n").unwrap();
        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.live.base.as_str(), "USD");

        let missing = file.path().with_extension("missing");
        assert!(AppConfig::load_from_path(missing).is_err());
    }
}
