//! Configuration management for topic-explorer using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default API base URL (the backend's development address).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors loading an explicit configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Custom user agent (None = crate default).
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    /// User agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Config {
    /// Load configuration using prefer crate.
    /// Automatically discovers topic-explorer config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("topic-explorer").await {
            Ok(pref_config) => {
                let base_url: Option<String> = pref_config.get("base_url").ok();
                let request_timeout: Option<u64> = pref_config.get("request_timeout").ok();
                let user_agent: Option<String> = pref_config.get("user_agent").ok();

                Config {
                    base_url,
                    request_timeout,
                    user_agent,
                }
            }
            Err(_) => {
                // No config file found, use defaults
                Self::default()
            }
        }
    }

    /// Load an explicit TOML file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply configuration to settings. Unset fields leave settings alone.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
    }
}

/// Load settings: an explicit file if given, otherwise discovered config.
pub async fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let config = match explicit {
        Some(path) => Config::load_file(path)?,
        None => Config::load().await,
    };
    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://localhost:5050");
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert!(settings.user_agent.is_none());
    }

    #[test]
    fn test_partial_config_applies_only_set_fields() {
        let config = Config::from_toml_str("request_timeout = 5\n").unwrap();
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings);
        assert_eq!(settings.request_timeout, 5);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml_str("request_timeout = \"soon\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[tokio::test]
    async fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://api.example.org:8080\"").unwrap();
        writeln!(file, "user_agent = \"explorer-test/1.0\"").unwrap();

        let settings = load_settings(Some(file.path())).await.unwrap();
        assert_eq!(settings.base_url, "http://api.example.org:8080");
        assert_eq!(settings.user_agent.as_deref(), Some("explorer-test/1.0"));
        assert_eq!(settings.request_timeout, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn test_load_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_settings(Some(&missing)).await,
            Err(ConfigError::Io { .. })
        ));
    }
}
