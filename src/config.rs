//! Ticker configuration stored as a flat JSON file
//!
//! The file is created with three default tokens on first run. Every other
//! problem with it (unreadable, malformed, empty token list) is reported as a
//! `ConfigError` so startup can fail with a clear message.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::providers::COINGECKO_API_BASE;

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Tokens written to a freshly created config file
pub const DEFAULT_TOKENS: [&str; 3] = ["bitcoin", "ethereum", "solana"];

const DEFAULT_API_BASE_URL: &str = COINGECKO_API_BASE;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
const MIN_REFRESH_INTERVAL_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur while loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config file {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Contents of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Ordered list of token identifiers to show
    #[serde(rename = "Tokens", alias = "tokens")]
    pub tokens: Vec<String>,

    /// Seconds between refresh ticks
    #[serde(
        default = "default_refresh_interval_secs",
        skip_serializing_if = "is_default_refresh_interval"
    )]
    pub refresh_interval_secs: u64,

    /// Base URL of the CoinGecko-compatible price API
    #[serde(
        default = "default_api_base_url",
        skip_serializing_if = "is_default_api_base_url"
    )]
    pub api_base_url: String,

    /// Per-request HTTP timeout in seconds
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "is_default_request_timeout"
    )]
    pub request_timeout_secs: u64,
}

fn default_refresh_interval_secs() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn is_default_refresh_interval(secs: &u64) -> bool {
    *secs == DEFAULT_REFRESH_INTERVAL_SECS
}

fn is_default_api_base_url(url: &str) -> bool {
    url == DEFAULT_API_BASE_URL
}

fn is_default_request_timeout(secs: &u64) -> bool {
    *secs == DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            api_base_url: default_api_base_url(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl TickerConfig {
    /// Load the config at `path`, writing the defaults first if it does not exist
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("Config file {} not found, creating defaults", path.display());
            Self::default().save(path)?;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(path, &content)?;
        tracing::debug!(
            "Loaded {} tokens from {}: {:?}",
            config.tokens.len(),
            path.display(),
            config.tokens
        );
        Ok(config)
    }

    /// Decode and validate config file contents
    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let mut config: TickerConfig =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let invalid = |reason: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        };

        for token in config.tokens.iter_mut() {
            *token = token.trim().to_string();
        }

        if config.tokens.is_empty() {
            return Err(invalid("token list is empty".to_string()));
        }
        if let Some(index) = config.tokens.iter().position(|t| t.is_empty()) {
            return Err(invalid(format!("token #{} is blank", index + 1)));
        }
        if config.refresh_interval_secs < MIN_REFRESH_INTERVAL_SECS {
            return Err(invalid(format!(
                "refresh_interval_secs must be at least {}",
                MIN_REFRESH_INTERVAL_SECS
            )));
        }
        if config.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs must be positive".to_string()));
        }

        Ok(config)
    }

    /// Write the config as indented JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
