use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::monitor::types::Target;

// =============================================================================
// Time-related constants
// =============================================================================

/// Default refresh interval in milliseconds (1 hour)
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60 * 60 * 1000;

/// Timeout for HTTP requests made by version sources in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Default address of the HTTP server
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

/// Default base URL for the GitHub API
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Monitor configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MonitorConfig {
    /// Interval between fetch cycles in milliseconds
    pub refresh_interval: u64,
    /// Maximum number of targets fetched at the same time, unlimited when absent
    pub max_concurrency: Option<usize>,
    pub github: GitHubConfig,
    pub targets: Vec<Target>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL_MS,
            max_concurrency: None,
            github: GitHubConfig::default(),
            targets: Vec::new(),
        }
    }
}

/// GitHub source configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub base_url: String,
    /// Token sent as a bearer token to raise the API rate limit
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_BASE_URL.to_string(),
            token: None,
        }
    }
}

impl MonitorConfig {
    /// Load and check the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.refresh_interval == 0 {
            return Err(ConfigError::Invalid(
                "refreshInterval must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(ConfigError::Invalid(
                "maxConcurrency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval)
    }
}

/// Returns the path to the default configuration file.
/// Uses $XDG_CONFIG_HOME/version-monitor/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/version-monitor/config.json,
/// or ./version-monitor/config.json if neither is available.
pub fn default_config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("version-monitor")
}
