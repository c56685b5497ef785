//! Configuration management for the dex-embed service.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings so the server runs without a
//! config file present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// MangaDex API settings
    pub mangadex: MangaDexConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub bind_address: String,

    /// Port to listen on
    pub port: u16,
}

/// MangaDex API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MangaDexConfig {
    /// API base URL
    pub api_base_url: String,

    /// Public site base URL, used for canonical title links
    pub site_base_url: String,

    /// Base URL for cover images
    pub covers_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Time to earn one request permit back, in milliseconds
    pub refill_interval_ms: u64,

    /// Maximum number of permits available at once
    pub burst: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

impl RateLimitConfig {
    /// Refill interval as a `Duration`
    pub fn refill_interval(&self) -> Duration {
        Duration::from_millis(self.refill_interval_ms)
    }
}

impl MangaDexConfig {
    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 8080,
            },
            mangadex: MangaDexConfig {
                api_base_url: "https://api.mangadex.org".to_string(),
                site_base_url: "https://mangadex.org".to_string(),
                covers_base_url: "https://uploads.mangadex.org/covers".to_string(),
                request_timeout_secs: 30,
                rate_limit: RateLimitConfig {
                    refill_interval_ms: 2000,
                    burst: 5,
                },
            },
            logging: LoggingConfig {
                log_dir: "data/logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load configuration from a TOML file or fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }
}
