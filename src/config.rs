//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity of every stage created on first write
    pub default_capacity: usize,
    /// TTL in seconds for writes that don't specify one
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Seconds between stats snapshot-and-reset cycles
    pub stats_reset_interval: u64,
    /// Most stages the registry will hold, counting lazily created ones
    pub max_stages: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_CAPACITY` - Per-stage capacity (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_RESET_INTERVAL` - Stats cycle in seconds (default: 86400)
    /// - `MAX_STAGES` - Stage count limit (default: 256)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_capacity: parse_env("DEFAULT_CAPACITY").unwrap_or(defaults.default_capacity),
            default_ttl: parse_env("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_env("SERVER_PORT").unwrap_or(defaults.server_port),
            stats_reset_interval: parse_env("STATS_RESET_INTERVAL")
                .unwrap_or(defaults.stats_reset_interval),
            max_stages: parse_env("MAX_STAGES").unwrap_or(defaults.max_stages),
        }
    }

    /// Rejects values the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.default_capacity == 0 {
            return Err(CacheError::Configuration(
                "DEFAULT_CAPACITY must be greater than zero".to_string(),
            ));
        }
        if self.default_ttl == 0 {
            return Err(CacheError::Configuration(
                "DEFAULT_TTL must be greater than zero".to_string(),
            ));
        }
        if self.stats_reset_interval == 0 {
            return Err(CacheError::Configuration(
                "STATS_RESET_INTERVAL must be greater than zero".to_string(),
            ));
        }
        if self.max_stages == 0 {
            return Err(CacheError::Configuration(
                "MAX_STAGES must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_capacity: 1000,
            default_ttl: crate::cache::DEFAULT_TTL_SECONDS,
            server_port: 3000,
            stats_reset_interval: 24 * 60 * 60,
            max_stages: 256,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
