//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Example
//!
//! ```bash
//! export LISTEN="0.0.0.0:8181"
//! export BASE_URL="https://s.example.com"
//! export STORAGE_TTL_SECONDS=86400
//! export RATE_LIMITER_LIMIT=100
//! export RATE_LIMITER_WINDOW_SECONDS=60
//! ```
//!
//! ## Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8181`)
//! - `BASE_URL` - Public prefix for generated short URLs (default: `http://localhost:8181`)
//! - `STORAGE_TTL_SECONDS` - Link lifetime; `0` disables expiry (default: 86400)
//! - `RATE_LIMITER_ENABLED` - Toggle per-client throttling (default: `true`)
//! - `RATE_LIMITER_LIMIT` - Requests admitted per window (default: 100)
//! - `RATE_LIMITER_WINDOW_SECONDS` - Window length (default: 60)
//! - `BEHIND_PROXY` - Key the limiter on `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Longest accepted rate-limit window (one day).
const MAX_WINDOW_SECONDS: u64 = 86_400;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    /// Seconds a link lives after being saved. `0` keeps links until restart.
    pub storage_ttl_seconds: u64,
    pub rate_limiter_enabled: bool,
    /// Requests admitted per client per window.
    pub rate_limit: u32,
    pub rate_limit_window_seconds: u64,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable is set but unparsable.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8181".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8181".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let storage_ttl_seconds = parse_var("STORAGE_TTL_SECONDS", 86_400)?;
        let rate_limiter_enabled = parse_flag("RATE_LIMITER_ENABLED", true)?;
        let rate_limit = parse_var("RATE_LIMITER_LIMIT", 100)?;
        let rate_limit_window_seconds = parse_var("RATE_LIMITER_WINDOW_SECONDS", 60)?;
        let behind_proxy = parse_flag("BEHIND_PROXY", false)?;

        Ok(Self {
            listen_addr,
            base_url,
            log_level,
            log_format,
            storage_ttl_seconds,
            rate_limiter_enabled,
            rate_limit,
            rate_limit_window_seconds,
            behind_proxy,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not an `ip:port` socket address
    /// - `base_url` is not an absolute http(s) URL
    /// - the rate limit or its window is zero, or the window exceeds one day
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        self.listen_addr.parse::<SocketAddr>().with_context(|| {
            format!(
                "LISTEN must be an 'ip:port' socket address, got '{}'",
                self.listen_addr
            )
        })?;

        let base_url = url::Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!(
                "BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.rate_limit == 0 {
            anyhow::bail!("RATE_LIMITER_LIMIT must be greater than 0");
        }

        if self.rate_limit_window_seconds == 0 || self.rate_limit_window_seconds > MAX_WINDOW_SECONDS
        {
            anyhow::bail!(
                "RATE_LIMITER_WINDOW_SECONDS must be between 1 and {}, got {}",
                MAX_WINDOW_SECONDS,
                self.rate_limit_window_seconds
            );
        }

        Ok(())
    }

    /// Link lifetime; [`Duration::ZERO`] disables expiry.
    pub fn storage_ttl(&self) -> Duration {
        Duration::from_secs(self.storage_ttl_seconds)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_seconds)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);

        if self.storage_ttl_seconds == 0 {
            tracing::info!("  Link TTL: disabled");
        } else {
            tracing::info!("  Link TTL: {}s", self.storage_ttl_seconds);
        }

        if self.rate_limiter_enabled {
            tracing::info!(
                "  Rate limiter: {} requests / {}s{}",
                self.rate_limit,
                self.rate_limit_window_seconds,
                if self.behind_proxy { " (proxy headers)" } else { "" }
            );
        } else {
            tracing::info!("  Rate limiter: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: '{value}'")),
        _ => Ok(default),
    }
}

fn parse_flag(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => anyhow::bail!("{name} must be a boolean, got '{value}'"),
        },
        _ => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
