use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Creates a default configuration file at the default location
pub fn setup() -> Result<()> {
    let path = AppConfig::default_config_path()?;
    setup_at_path(path)
}

/// Writes the built-in defaults as YAML to `path`; an existing file is left untouched.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = serde_yaml::to_string(&AppConfig::default())
        .context("Failed to serialize default configuration")?;

    std::fs::write(path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HistoryMode;
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_loadable_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        setup_at_path(&config_path)?;

        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(config.live.base.as_str(), "JPY");
        assert_eq!(config.history.window_size, 5);
        assert_eq!(config.history.mode, HistoryMode::Dated);
        Ok(())
    }

    #[test]
    fn test_setup_refuses_to_overwrite() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "live:\n  base: USD\n")?;

        assert!(setup_at_path(&config_path).is_err());
        assert_eq!(
            std::fs::read_to_string(&config_path)?,
            "live:\n  base: USD\n"
        );
        Ok(())
    }
}
