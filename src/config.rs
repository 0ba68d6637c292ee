//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Durations are given in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of cached orders, 0 = unbounded
    pub cache_capacity: usize,
    /// Lifetime of a cached order after its last write
    pub cache_ttl: u64,
    /// Delay between expired-entry sweeps
    pub cleanup_interval: u64,
    /// Orders per storage write
    pub batch_size: usize,
    /// Maximum delay before pending orders are written
    pub flush_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Depth of the in-process event stream
    pub event_buffer: usize,
    /// Default log level for this crate, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cached orders (default: 1000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 900)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `APP_BATCH_SIZE` - Orders per storage write (default: 1)
    /// - `APP_FLUSH_TIMEOUT` - Flush timeout in seconds (default: 1)
    /// - `APP_PORT` - HTTP server port (default: 8080)
    /// - `APP_EVENT_BUFFER` - Event stream depth (default: 1024)
    /// - `LOG_LEVEL` - Log level (default: info)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: env_or("CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cleanup_interval: env_or("CACHE_CLEANUP_INTERVAL", defaults.cleanup_interval),
            batch_size: env_or("APP_BATCH_SIZE", defaults.batch_size),
            flush_timeout: env_or("APP_FLUSH_TIMEOUT", defaults.flush_timeout),
            server_port: env_or("APP_PORT", defaults.server_port),
            event_buffer: env_or("APP_EVENT_BUFFER", defaults.event_buffer),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
        }
    }

    /// Rejects values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("APP_BATCH_SIZE must be at least 1".into()));
        }
        if self.flush_timeout == 0 {
            return Err(ConfigError::Invalid("APP_FLUSH_TIMEOUT must be positive".into()));
        }
        if self.cleanup_interval == 0 {
            return Err(ConfigError::Invalid(
                "CACHE_CLEANUP_INTERVAL must be positive".into(),
            ));
        }
        if self.event_buffer == 0 {
            return Err(ConfigError::Invalid("APP_EVENT_BUFFER must be at least 1".into()));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_secs(self.flush_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            cache_ttl: 900,
            cleanup_interval: 300,
            batch_size: 1,
            flush_timeout: 1,
            server_port: 8080,
            event_buffer: 1024,
            log_level: "info".to_string(),
        }
    }
}

/// Parses `name`, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
