//! Configuration file handling.
//!
//! Reads `config.toml` from the platform config directory
//! (e.g. `~/.config/pantry/config.toml`) unless a path is given.
//! `PANTRY_API_URL` overrides the backend origin.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::services::ShoppingSettings;

/// Environment variable overriding [`Config::api_url`].
pub const API_URL_ENV: &str = "PANTRY_API_URL";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend origin serving `/api/shopping`.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How long a search match stays highlighted.
    #[serde(default = "default_highlight_secs")]
    pub highlight_secs: u64,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_highlight_secs() -> u64 {
    5
}

fn default_log_filter() -> String {
    "pantry=info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            highlight_secs: default_highlight_secs(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// If `custom_path` is provided it must exist. Otherwise the default
    /// location is used, falling back to defaults when no file is there.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let config = match custom_path {
            Some(path) => Self::read(&path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::read(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Config::default()
                }
            },
        };

        config.with_env_overrides().validated()
    }

    /// Parse configuration from a TOML file.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config file location, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pantry").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            tracing::info!("Overriding api_url from {API_URL_ENV}");
            self.api_url = api_url;
        }
        self
    }

    fn validated(self) -> Result<Self> {
        Url::parse(&self.api_url).with_context(|| format!("Invalid api_url: {}", self.api_url))?;
        anyhow::ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be positive");
        Ok(self)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Settings for the shopping list state manager.
    pub fn shopping_settings(&self) -> ShoppingSettings {
        ShoppingSettings {
            highlight_duration: Duration::from_secs(self.highlight_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_gets_defaults() {
        let file = write_config("api_url = \"http://192.168.0.10:8080\"\n");

        let config = Config::read(file.path()).unwrap();

        assert_eq!(config.api_url, "http://192.168.0.10:8080");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.highlight_secs, 5);
        assert_eq!(config.log_filter, "pantry=info");
    }

    #[test]
    fn highlight_seconds_feed_shopping_settings() {
        let file = write_config("highlight_secs = 8\n");

        let config = Config::read(file.path()).unwrap();

        assert_eq!(
            config.shopping_settings().highlight_duration,
            Duration::from_secs(8)
        );
    }

    #[test]
    fn missing_custom_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("request_timeout_secs = \"soon\"\n");
        let err = Config::read(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn invalid_url_fails_validation() {
        let config = Config {
            api_url: "localhost without scheme".to_string(),
            ..Config::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validated().is_err());
    }
}
