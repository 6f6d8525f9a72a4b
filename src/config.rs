//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::{DEFAULT_KEY_PREFIX, DEFAULT_LIMIT, DEFAULT_TTL_SECS};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL, None = run on the in-process store
    pub redis_url: Option<String>,
    /// TTL in seconds applied to each tenant's snapshot list
    pub ttl_seconds: u64,
    /// Number of snapshots kept and returned when a caller gives no limit
    pub snapshot_limit: usize,
    /// Upper bound on the startup connection attempt, in milliseconds
    pub connect_timeout_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

/// Settings consumed by [`crate::cache::SnapshotCache`].
#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub redis_url: Option<String>,
    pub ttl: Duration,
    pub connect_timeout: Duration,
    pub key_prefix: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection target (default: unset, blank counts as unset)
    /// - `CACHE_TTL_SECONDS` - Snapshot list TTL in seconds (default: 900)
    /// - `SNAPSHOT_LIMIT` - Default snapshots per tenant (default: 5)
    /// - `REDIS_CONNECT_TIMEOUT_MS` - Startup connect timeout (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            ttl_seconds: parse_var("CACHE_TTL_SECONDS").unwrap_or(DEFAULT_TTL_SECS),
            snapshot_limit: parse_var("SNAPSHOT_LIMIT").unwrap_or(DEFAULT_LIMIT),
            connect_timeout_ms: parse_var("REDIS_CONNECT_TIMEOUT_MS").unwrap_or(5000),
            server_port: parse_var("SERVER_PORT").unwrap_or(3000),
        }
    }

    /// Derives the cache settings from this configuration.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            redis_url: self.redis_url.clone(),
            ttl: Duration::from_secs(self.ttl_seconds),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            ttl_seconds: DEFAULT_TTL_SECS,
            snapshot_limit: DEFAULT_LIMIT,
            connect_timeout_ms: 5000,
            server_port: 3000,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Config::default().cache_settings()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
