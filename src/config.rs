//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::credentials::DEFAULT_TOKEN_KEY;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub credentials: CredentialsConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GraphQL API location
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

fn default_endpoint_path() -> String {
    "/graphql".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
        }
    }
}

impl ApiConfig {
    /// Full endpoint URL: base (without trailing slash) + path
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint_path)
    }
}

/// Where the bearer token comes from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CredentialsConfig {
    /// Fixed token from the config file
    Static { token: String },

    /// Key in the local storage file
    Storage {
        #[serde(default)]
        path: Option<PathBuf>,
        #[serde(default = "default_token_key")]
        key: String,
    },

    /// Environment variable read per request
    Env {
        #[serde(default = "default_token_var")]
        var: String,
    },

    /// Never send a token
    #[serde(rename = "none")]
    Anonymous,
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

fn default_token_var() -> String {
    "GRAPHLINK_AUTH_TOKEN".to_string()
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        CredentialsConfig::Storage {
            path: None,
            key: default_token_key(),
        }
    }
}

/// How structured API errors are shown to the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Print to stderr
    #[default]
    Console,
    /// Print to stderr and wait for Enter
    Blocking,
    /// No alerts, logs only
    Silent,
}

/// Notification configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub mode: NotifyMode,
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
    "info".to_string()
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

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("graphlink").join("config.toml")),
            Some(PathBuf::from("./graphlink.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    /// Load the first candidate file that exists and parses
    ///
    /// Unreadable or malformed files are skipped with a warning.
    pub fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("GRAPHLINK_BASE_URL") {
            self.api.base_url = base_url;
        }

        // A token in the environment replaces whatever source was configured
        if let Some(token) = lookup("GRAPHLINK_TOKEN") {
            self.credentials = CredentialsConfig::Static { token };
        }

        if let Some(level) = lookup("GRAPHLINK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("GRAPHLINK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# graphlink Configuration
#
# Environment variables override these settings:
# - GRAPHLINK_BASE_URL
# - GRAPHLINK_TOKEN (forces a static token)
# - GRAPHLINK_LOG_LEVEL
# - GRAPHLINK_LOG_FORMAT

[api]
# Base URL of the GraphQL server
base_url = "http://localhost:4000"

# Path appended to the base URL
endpoint_path = "/graphql"

[credentials]
# Token source: storage, static, env, or none
source = "storage"

# Key read from the local storage file
key = "authToken"

# Storage file (defaults to the platform data directory)
# path = "~/.local/share/graphlink/storage.json"

# For source = "static":
# token = "..."

# For source = "env":
# var = "GRAPHLINK_AUTH_TOKEN"

[notifications]
# How API errors are shown: console, blocking, or silent
mode = "console"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
