//! Configuration management for the Sputnik bot.
//!
//! All settings live in a single JSON file at `~/.sputnik/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Explicit config file values
//! 2. Environment variables
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! - `SPUTNIK_BOT_TOKEN` / `TELEGRAM_BOT_TOKEN` → telegram.bot_token
//! - `SPUTNIK_LOG_LEVEL` → observability.log_level
//! - `SPUTNIK_LOG_FORMAT` → observability.log_format
//!
//! The bot token is never stored in source; supply it via the config file or
//! one of the environment variables above.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new().map_or_else(
        || PathBuf::from(".sputnik"),
        |dirs| dirs.home_dir().join(".sputnik"),
    )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Telegram Configuration
// ============================================================================

/// Telegram channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Whether the Telegram channel is active. When disabled the bot falls
    /// back to the CLI channel.
    #[serde(default)]
    pub enabled: bool,

    /// Bot API token. Usually supplied via `SPUTNIK_BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: String,

    /// Long-poll timeout passed to getUpdates, in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    /// Sleep between retries after a poll or parse error, in seconds.
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bot_token: String::new(),
            poll_timeout_secs: default_poll_timeout_secs(),
            error_backoff_secs: default_error_backoff_secs(),
        }
    }
}

fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_error_backoff_secs() -> u64 {
    5
}

// ============================================================================
// Providers Configuration
// ============================================================================

/// Upstream data provider endpoints and timeouts.
///
/// The URLs are configurable so tests can point them at a local mock server;
/// the defaults are the real public endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Primary random-fact endpoint.
    #[serde(default = "default_facts_url")]
    pub facts_url: String,

    /// Secondary random-fact endpoint, tried when the primary fails.
    #[serde(default = "default_facts_fallback_url")]
    pub facts_fallback_url: String,

    /// Weather endpoint. The city is appended as a path segment.
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// Currency rates endpoint (rates against RUB).
    #[serde(default = "default_rates_url")]
    pub rates_url: String,

    /// Timeout for fact and rates calls, in seconds.
    #[serde(default = "default_short_timeout_secs")]
    pub short_timeout_secs: u64,

    /// Timeout for weather calls, in seconds.
    #[serde(default = "default_weather_timeout_secs")]
    pub weather_timeout_secs: u64,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            facts_url: default_facts_url(),
            facts_fallback_url: default_facts_fallback_url(),
            weather_url: default_weather_url(),
            rates_url: default_rates_url(),
            short_timeout_secs: default_short_timeout_secs(),
            weather_timeout_secs: default_weather_timeout_secs(),
        }
    }
}

fn default_facts_url() -> String {
    "https://uselessfacts.jsph.pl/random.json".into()
}

fn default_facts_fallback_url() -> String {
    "https://facts.bobthecow.org/random".into()
}

fn default_weather_url() -> String {
    "https://wttr.in".into()
}

fn default_rates_url() -> String {
    "https://api.exchangerate-api.com/v4/latest/RUB".into()
}

fn default_short_timeout_secs() -> u64 {
    5
}

fn default_weather_timeout_secs() -> u64 {
    10
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" for structured JSON, "pretty" for human-readable.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration for all Sputnik crates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Telegram channel settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Upstream provider endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable fallbacks.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("SPUTNIK_BOT_TOKEN") {
            self.telegram.bot_token = token;
        } else if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = token;
        }

        if let Ok(level) = std::env::var("SPUTNIK_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Ok(format) = std::env::var("SPUTNIK_LOG_FORMAT") {
            self.observability.log_format = format;
        }
    }

    /// Whether the Telegram channel is usable: enabled and a token present.
    pub fn telegram_ready(&self) -> bool {
        self.telegram.enabled && !self.telegram.bot_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.telegram.enabled);
        assert_eq!(config.telegram.poll_timeout_secs, 30);
        assert_eq!(config.providers.short_timeout_secs, 5);
        assert_eq!(config.providers.weather_timeout_secs, 10);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.providers.weather_url.starts_with("https://wttr.in"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{
                "telegram": { "enabled": true, "bot_token": "123:ABC" },
                "observability": { "log_level": "debug" }
            }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.telegram.enabled);
        assert_eq!(config.telegram.bot_token, "123:ABC");
        assert_eq!(config.observability.log_level, "debug");
        // Untouched sections fall back to defaults
        assert_eq!(config.providers.short_timeout_secs, 5);
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = PathBuf::from("/nonexistent/sputnik/config.json");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.providers.facts_url, config.providers.facts_url);
        assert_eq!(parsed.telegram.poll_timeout_secs, 30);
    }

    #[test]
    fn test_telegram_ready() {
        let mut config = Config::default();
        assert!(!config.telegram_ready());

        config.telegram.enabled = true;
        assert!(!config.telegram_ready());

        config.telegram.bot_token = "123:ABC".into();
        assert!(config.telegram_ready());
    }
}
