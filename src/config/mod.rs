use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the memo REST API
    pub api_url: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Capture mouse input in the TUI
    pub mouse: bool,

    /// Input poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
            mouse: true,
            tick_rate_ms: 50,
        }
    }
}

impl Config {
    /// Initialize configuration: defaults, then the config file, then
    /// environment variables. CLI flags are applied by the caller last.
    pub async fn init() -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();

        if let Some(path) = Self::config_file_path() {
            if let Ok(file_config) = Self::load_from_file(&path).await {
                config = file_config;
                debug!("Loaded configuration from {}", path.display());
            }
        }

        config.load_from_env();
        Ok(config)
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("memoterm").join("config.json"))
    }

    async fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn load_from_env(&mut self) {
        if let Ok(api_url) = std::env::var("MEMOTERM_API_URL") {
            self.api_url = api_url;
        }
        if let Ok(timeout) = std::env::var("MEMOTERM_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                self.timeout_secs = timeout;
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Validate the configuration before use
    pub fn validate(&self) -> Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("API URL must start with http:// or https://: {}", self.api_url);
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("Request timeout must be greater than zero");
        }
        if self.tick_rate_ms == 0 {
            anyhow::bail!("Tick rate must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config {
            api_url: "localhost:8080".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_from_file_merges_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"api_url": "http://memo.example/api"}"#)
            .await
            .unwrap();

        let config = Config::load_from_file(&path).await.unwrap();
        assert_eq!(config.api_url, "http://memo.example/api");
        // Unspecified fields keep their defaults
        assert_eq!(config.timeout_secs, 10);
        assert!(config.mouse);
    }
}
