//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that is
//! populated from environment variables (optionally via a `.env` file) on top
//! of sensible defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default upstream market data host.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Default upstream request timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// The upstream rejects requests without a browser-like user agent.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream market data provider configuration.
    pub upstream: UpstreamConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Upstream market data provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

/// Configuration for external API credentials.
///
/// The keys are loaded for future providers; no current request sends them.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Alpha Vantage API key.
    pub alpha_vantage_api_key: Option<String>,

    /// Finnhub API key.
    pub finnhub_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "alpha_vantage_api_key",
                &self.alpha_vantage_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "finnhub_api_key",
                &self.finnhub_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "stock-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
            credentials: CredentialsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_`, for example `MCP_SERVER_NAME`
    /// or `MCP_UPSTREAM_TIMEOUT_SECS`. Provider keys use their conventional
    /// names (`ALPHA_VANTAGE_API_KEY`, `FINNHUB_API_KEY`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(version) = std::env::var("MCP_SERVER_VERSION") {
            config.server.version = version;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("MCP_UPSTREAM_BASE_URL") {
            config.upstream.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("MCP_UPSTREAM_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.upstream.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_UPSTREAM_TIMEOUT_SECS={:?}, using {}s",
                    timeout, config.upstream.timeout_secs
                ),
            }
        }

        if let Ok(user_agent) = std::env::var("MCP_UPSTREAM_USER_AGENT") {
            config.upstream.user_agent = user_agent;
        }

        if let Ok(api_key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            config.credentials.alpha_vantage_api_key = Some(api_key);
            info!("Alpha Vantage API key loaded from environment");
        }

        if let Ok(api_key) = std::env::var("FINNHUB_API_KEY") {
            config.credentials.finnhub_api_key = Some(api_key);
            info!("Finnhub API key loaded from environment");
        }

        config
    }

    /// Check the settings that would otherwise only fail on the first request.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.upstream.base_url).map_err(|e| {
            Error::config(format!(
                "invalid upstream base URL {:?}: {}",
                self.upstream.base_url, e
            ))
        })?;

        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "upstream base URL {:?} cannot carry a path",
                self.upstream.base_url
            )));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(Error::config("upstream timeout must be at least 1 second"));
        }

        Ok(())
    }
}
