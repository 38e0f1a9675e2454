//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Record store base URL
    #[serde(default)]
    pub store_url: Option<String>,

    /// Bookend service URL (used for the search proxy)
    #[serde(default)]
    pub service_url: Option<String>,
}

impl Config {
    /// Load config from the default path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(content) = fs::read_to_string(&path)
            && let Ok(config) = toml::from_str(&content)
        {
            return config;
        }
        Self::default()
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serializing config")?;
        fs::write(&path, content)
            .with_context(|| format!("writing config file {}", path.display()))
    }
}

/// Path to the CLI config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookend")
        .join("cli.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_is_empty() {
        let config = Config::default();
        assert!(config.store_url.is_none());
        assert!(config.service_url.is_none());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            store_url: Some("https://example.mockapi.io/api/v1".to_string()),
            service_url: Some("http://localhost:8080".to_string()),
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.store_url, config.store_url);
        assert_eq!(parsed.service_url, config.service_url);
    }

    #[test]
    fn test_config_tolerates_missing_fields() {
        let parsed: Config = toml::from_str("").unwrap();
        assert!(parsed.store_url.is_none());
    }

    #[test]
    fn test_config_path_shape() {
        assert!(config_path().ends_with("bookend/cli.toml"));
    }
}
