//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Without any file the client talks to the deployed challenge endpoint.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::endpoint::DEFAULT_ENDPOINT_URL;
use crate::leaderboard::REFRESH_INTERVAL_SECS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Challenge endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Client behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Leaderboard polling interval
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    REFRESH_INTERVAL_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// First config file that exists in the default locations:
    /// `~/.config/stepboard/config.toml`, then `./stepboard.toml`
    pub fn default_path() -> Option<PathBuf> {
        let candidates = [
            dirs::config_dir().map(|p| p.join("stepboard").join("config.toml")),
            Some(PathBuf::from("./stepboard.toml")),
        ];
        first_existing(candidates.into_iter().flatten())
    }

    /// Load a file with environment overrides, or only the environment without one.
    ///
    /// A file that exists but cannot be loaded is an error.
    pub fn load_or_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::from_env()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.url.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint.url must not be empty".to_string()));
        }
        if self.client.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "client.poll_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("STEPBOARD_ENDPOINT_URL") {
            if !url.trim().is_empty() {
                self.endpoint.url = url;
            }
        }
        if let Ok(secs) = std::env::var("STEPBOARD_POLL_INTERVAL_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                if s > 0 {
                    self.client.poll_interval_secs = s;
                }
            }
        }
        if let Ok(level) = std::env::var("STEPBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STEPBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn first_existing(paths: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    paths.into_iter().find(|p| p.exists())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    format!(
        r#"# Stepboard Configuration
#
# Environment variables override these settings:
# - STEPBOARD_ENDPOINT_URL
# - STEPBOARD_POLL_INTERVAL_SECS
# - STEPBOARD_LOG_LEVEL
# - STEPBOARD_LOG_FORMAT

[endpoint]
# Challenge endpoint (spreadsheet web app URL)
url = "{}"

# Request timeout in seconds
request_timeout_secs = 30

[client]
# Leaderboard refresh interval for `watch` (seconds)
poll_interval_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#,
        DEFAULT_ENDPOINT_URL
    )
}
