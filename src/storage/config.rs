//! Client configuration loading.
//!
//! Loads configuration from:
//! - Linux: `~/.config/sleepiq/config.toml`
//! - macOS: `~/Library/Application Support/com.sleepnumber.sleepiq/config.toml`
//! - Windows: `%APPDATA%/sleepnumber/sleepiq/config/config.toml`
//!
//! ## Precedence
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. Values set explicitly on [`ClientConfig`] by the host
//! 2. Environment variables
//! 3. Config file
//! 4. Built-in defaults
//!
//! ## Environment Variables
//!
//! - `SLEEPIQ_API_BASE`: Base URL of the bed API
//! - `SLEEPIQ_INSIGHTS_BASE`: Base URL of the Insights API
//! - `SLEEPIQ_TIMEOUT`: Per-request timeout in seconds
//! - `SLEEPIQ_SUBSCRIPTION_KEY`: Insights subscription key
//! - `SLEEPIQ_CONFIG`: Override config file path
//!
//! Credentials are never read from configuration; the host passes them to
//! the login calls.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::error::{Result, SleepIqError};

// =============================================================================
// Defaults
// =============================================================================

/// Production base URL of the bed API.
pub const DEFAULT_API_BASE: &str = "https://prod-api.sleepiq.sleepnumber.com/rest";
/// Production base URL of the Insights API.
pub const DEFAULT_INSIGHTS_BASE: &str = "https://sleepiqapi.azure-api.net/prod";
/// Subscription key the Insights gateway expects from the SleepIQ web client.
pub const DEFAULT_SUBSCRIPTION_KEY: &str = "3c924e14923642baa1c4ad1d5096a1c5";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

const MAX_TIMEOUT_SECONDS: u64 = 300;

// =============================================================================
// Environment Variable Names
// =============================================================================

/// Environment variable for the bed API base URL.
pub const ENV_API_BASE: &str = "SLEEPIQ_API_BASE";
/// Environment variable for the Insights API base URL.
pub const ENV_INSIGHTS_BASE: &str = "SLEEPIQ_INSIGHTS_BASE";
/// Environment variable for the timeout in seconds.
pub const ENV_TIMEOUT: &str = "SLEEPIQ_TIMEOUT";
/// Environment variable for the Insights subscription key.
pub const ENV_SUBSCRIPTION_KEY: &str = "SLEEPIQ_SUBSCRIPTION_KEY";
/// Environment variable to override the config file path.
pub const ENV_CONFIG: &str = "SLEEPIQ_CONFIG";

// =============================================================================
// ClientConfig
// =============================================================================

/// Settings for one client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the bed API.
    pub api_base: String,
    /// Base URL of the Insights API.
    pub insights_base: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Insights subscription key header value.
    pub subscription_key: String,
    /// Custom `User-Agent`; defaults to `sleepiq/<version>`.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            insights_base: DEFAULT_INSIGHTS_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            subscription_key: DEFAULT_SUBSCRIPTION_KEY.to_string(),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the config file and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but is invalid, or if any
    /// resolved value fails validation.
    pub fn load() -> Result<Self> {
        let config = if let Ok(path) = std::env::var(ENV_CONFIG) {
            Self::load_from(Path::new(&path))?
        } else {
            Self::load_from(&AppPaths::new().config_file())?
        };
        let config = config.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns default config if the file doesn't exist.
    /// Returns error only if the file exists but is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        tracing::debug!(?path, "Loading config file");
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SleepIqError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `SLEEPIQ_*` environment variables on top of this config.
    ///
    /// # Errors
    ///
    /// Returns an error if `SLEEPIQ_TIMEOUT` is not an integer.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(base) = env_value(ENV_API_BASE) {
            self.api_base = base;
        }
        if let Some(base) = env_value(ENV_INSIGHTS_BASE) {
            self.insights_base = base;
        }
        if let Some(key) = env_value(ENV_SUBSCRIPTION_KEY) {
            self.subscription_key = key;
        }
        if let Some(timeout) = env_value(ENV_TIMEOUT) {
            self.timeout_seconds = timeout.parse().map_err(|_| {
                SleepIqError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds, got \"{timeout}\""))
            })?;
        }
        Ok(self)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable base URLs, an empty subscription key
    /// or a timeout outside 1..=300 seconds.
    pub fn validate(&self) -> Result<()> {
        self.api_base_url()?;
        self.insights_base_url()?;

        if self.subscription_key.trim().is_empty() {
            return Err(SleepIqError::Config(
                "subscription_key must not be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(SleepIqError::Config(format!(
                "Timeout must be between 1 and {MAX_TIMEOUT_SECONDS} seconds, got {}",
                self.timeout_seconds
            )));
        }

        Ok(())
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parsed bed API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_base` is not an absolute http(s) URL.
    pub fn api_base_url(&self) -> Result<Url> {
        parse_base("api_base", &self.api_base)
    }

    /// Parsed Insights API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `insights_base` is not an absolute http(s) URL.
    pub fn insights_base_url(&self) -> Result<Url> {
        parse_base("insights_base", &self.insights_base)
    }
}

fn parse_base(key: &str, value: &str) -> Result<Url> {
    let url = Url::parse(value)
        .map_err(|e| SleepIqError::Config(format!("invalid {key} \"{value}\": {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(SleepIqError::Config(format!(
            "invalid {key} \"{value}\": must be an http or https URL"
        )));
    }
    Ok(url)
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
