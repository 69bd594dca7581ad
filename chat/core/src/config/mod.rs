//! TOML Configuration File Support
//!
//! Configuration for the chat backend connection, loaded from a TOML file at
//! `~/.config/chat-core/chat.toml`, the environment, and caller overrides.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Overrides supplied by the embedding application ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Environment Variables
//!
//! - `CHAT_ENDPOINT`: Full URL of the chat endpoint
//! - `CHAT_TIMEOUT_MS`: Per-request timeout in milliseconds
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! endpoint = "http://localhost:8080/api/chat"
//! timeout_ms = 30000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chat endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/chat";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_ENDPOINT: &str = "CHAT_ENDPOINT";
const ENV_TIMEOUT_MS: &str = "CHAT_TIMEOUT_MS";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value supplied programmatically
    Override,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Full URL of the chat endpoint
    pub endpoint: Option<String>,

    /// Per-request timeout in milliseconds
    pub timeout_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatToml {
    /// Backend configuration section
    pub backend: BackendToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Chat client configuration
#[derive(Clone, Debug)]
pub struct ChatConfig {
    /// Full URL of the chat endpoint
    pub endpoint: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ChatConfig {
    /// Create a configuration pointing at `endpoint` with default timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check that the values can drive a transport
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a non-http(s) endpoint or
    /// a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::ValidationError(format!("endpoint {:?}: {e}", self.endpoint))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "endpoint must use http or https, got {:?}",
                url.scheme()
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/chat-core/chat.toml` or
/// `~/.config/chat-core/chat.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("chat-core").join("chat.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting configuration is invalid. A missing config file is not an error.
pub fn load_config() -> Result<ChatConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed, or
/// if the resulting configuration is invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ChatConfig, ConfigError> {
    load_layers(path, |key| std::env::var(key).ok())
}

fn load_layers(
    path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ChatConfig, ConfigError> {
    // Start with defaults
    let mut config = ChatConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ChatToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Environment overrides file values
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ChatConfig, toml: &ChatToml) {
    if let Some(ref endpoint) = toml.backend.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(ms) = toml.backend.timeout_ms {
        config.request_timeout = Duration::from_millis(ms);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut ChatConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(endpoint) = env(ENV_ENDPOINT) {
        config.endpoint = endpoint;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = env(ENV_TIMEOUT_MS) {
        match timeout.parse::<u64>() {
            Ok(ms) => {
                config.request_timeout = Duration::from_millis(ms);
                config.source = ConfigSource::Env;
            }
            Err(e) => {
                tracing::warn!(value = %timeout, error = %e, "Ignoring unparsable {ENV_TIMEOUT_MS}");
            }
        }
    }
}

// =============================================================================
// Override Support
// =============================================================================

/// Builder for applying programmatic overrides to configuration
///
/// Use this after [`load_config`] to apply values chosen by the embedding
/// application.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Endpoint override
    pub endpoint: Option<String>,

    /// Request timeout override (milliseconds)
    pub timeout_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set endpoint override
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set request timeout override
    #[must_use]
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }

    /// Apply overrides to a configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the overridden values are invalid.
    pub fn apply(&self, config: &mut ChatConfig) -> Result<(), ConfigError> {
        if self.endpoint.is_some() || self.timeout_ms.is_some() {
            config.source = ConfigSource::Override;
        }

        if let Some(ref endpoint) = self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.request_timeout = Duration::from_millis(ms);
        }

        config.validate()
    }
}
