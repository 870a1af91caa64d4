//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export PORT=3000
//! export FETCH_TIMEOUT_SECS=30
//! export FETCH_ERROR_MODE=report
//! ```
//!
//! ## Optional Variables
//!
//! - `PORT` - Listening port (default: `3000`)
//! - `HOST` - Bind address (default: `0.0.0.0`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `FETCH_TIMEOUT_SECS` - Upper bound for one feed fetch (default: 30)
//! - `MAX_FEED_BYTES` - Largest accepted feed body (default: 10 MiB)
//! - `FETCH_ERROR_MODE` - `report` or `silent` (default: `report`)
//! - `GRAPHIQL` - Serve the interactive explorer (default: `true`)
//! - `USER_AGENT` - User-Agent sent to feed hosts (default: `feedql/<version>`)

use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::graphql::FetchErrorMode;
use crate::infrastructure::feed::FetchOptions;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
    /// Whole-request timeout for a feed fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Feeds larger than this are rejected with `FETCH_ERROR`.
    pub max_feed_bytes: usize,
    /// Whether `parse` failures are reported or silently resolve to null.
    pub fetch_error_mode: FetchErrorMode,
    /// Serve GraphiQL on `GET /graphql` for browsers.
    pub graphiql: bool,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            fetch_timeout_secs: 30,
            max_feed_bytes: 10 * 1024 * 1024,
            fetch_error_mode: FetchErrorMode::Report,
            graphiql: true,
            user_agent: concat!("feedql/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable or `FETCH_ERROR_MODE` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_var("PORT", defaults.port)?;
        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let fetch_timeout_secs = parse_var("FETCH_TIMEOUT_SECS", defaults.fetch_timeout_secs)?;
        let max_feed_bytes = parse_var("MAX_FEED_BYTES", defaults.max_feed_bytes)?;

        let fetch_error_mode = match env::var("FETCH_ERROR_MODE") {
            Ok(raw) => raw
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid FETCH_ERROR_MODE")?,
            Err(_) => defaults.fetch_error_mode,
        };

        let graphiql = env::var("GRAPHIQL")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(defaults.graphiql);

        let user_agent = env::var("USER_AGENT").unwrap_or(defaults.user_agent);

        Ok(Self {
            host,
            port,
            log_level,
            log_format,
            fetch_timeout_secs,
            max_feed_bytes,
            fetch_error_mode,
            graphiql,
            user_agent,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `host` is not an IPv4 or IPv6 address
    /// - `port` is 0
    /// - `log_format` is not `text` or `json`
    /// - `fetch_timeout_secs` or `max_feed_bytes` is 0
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        if self.port == 0 {
            anyhow::bail!("PORT must be between 1 and 65535");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.fetch_timeout_secs == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECS must be greater than 0");
        }

        if self.max_feed_bytes == 0 {
            anyhow::bail!("MAX_FEED_BYTES must be greater than 0");
        }

        if self.user_agent.trim().is_empty() {
            anyhow::bail!("USER_AGENT must not be empty");
        }

        Ok(())
    }

    /// Address the HTTP listener binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .trim()
            .parse()
            .with_context(|| format!("HOST must be an IP address, got '{}'", self.host))?;
        Ok(SocketAddr::from((ip, self.port)))
    }

    /// Fetch limits handed to the feed parser.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_bytes: self.max_feed_bytes,
            user_agent: self.user_agent.clone(),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        match self.listen_addr() {
            Ok(addr) => tracing::info!("  Listen address: {}", addr),
            Err(_) => tracing::info!("  Listen address: {}:{}", self.host, self.port),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Fetch timeout: {}s", self.fetch_timeout_secs);
        tracing::info!("  Max feed size: {} bytes", self.max_feed_bytes);
        tracing::info!("  Fetch error mode: {:?}", self.fetch_error_mode);
        tracing::info!(
            "  GraphiQL: {}",
            if self.graphiql { "enabled" } else { "disabled" }
        );
    }
}

/// Reads and parses an optional variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{raw}'")),
        Err(_) => Ok(default),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "HOST",
        "PORT",
        "LOG_FORMAT",
        "FETCH_TIMEOUT_SECS",
        "MAX_FEED_BYTES",
        "FETCH_ERROR_MODE",
        "GRAPHIQL",
        "USER_AGENT",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.port = 0;
        assert!(config.validate().is_err());

        config.port = 8080;

        // Test invalid log format
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.fetch_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.fetch_timeout_secs = 5;
        config.max_feed_bytes = 0;
        assert!(config.validate().is_err());

        config.max_feed_bytes = 1024;
        config.host = "localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_listen_addr_accepts_ipv6_hosts() {
        let mut config = Config {
            host: "::".to_string(),
            ..Config::default()
        };
        assert_eq!(config.listen_addr().unwrap().to_string(), "[::]:3000");
        assert!(config.validate().is_ok());

        config.host = "::1".to_string();
        config.port = 8080;
        let addr = config.listen_addr().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.to_string(), "[::1]:8080");
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_addr().unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(config.fetch_error_mode, FetchErrorMode::Report);
        assert!(config.graphiql);
        assert_eq!(config.fetch_options().timeout, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_loads_from_env() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("PORT", "8081");
            env::set_var("HOST", "127.0.0.1");
            env::set_var("FETCH_TIMEOUT_SECS", "5");
            env::set_var("MAX_FEED_BYTES", "2048");
            env::set_var("FETCH_ERROR_MODE", "silent");
            env::set_var("GRAPHIQL", "false");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8081");
        assert_eq!(config.fetch_error_mode, FetchErrorMode::Silent);
        assert!(!config.graphiql);

        let options = config.fetch_options();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.max_bytes, 2048);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_rejects_malformed_values() {
        clear_env();

        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PORT", "eighty");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("PORT", "3000");
            env::set_var("FETCH_ERROR_MODE", "loud");
        }
        assert!(Config::from_env().is_err());

        clear_env();
    }
}
