//! Configuration Module
//!
//! Loads the cache construction parameters from environment variables.

use std::env;

use chrono::Duration;

/// Cache construction parameters.
///
/// Both values use the signed convention: zero means "default" (never
/// expire, no automatic sweeping) and a negative value means "never".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied to writes that ask for the default expiration
    pub default_expiration: Duration,
    /// Interval between background sweeps
    pub cleanup_interval: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_EXPIRATION_MS` - Default TTL in milliseconds (default: 0)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: 0)
    pub fn from_env() -> Self {
        Self {
            default_expiration: millis_from_env("CACHE_DEFAULT_EXPIRATION_MS"),
            cleanup_interval: millis_from_env("CACHE_CLEANUP_INTERVAL_MS"),
        }
    }
}

fn millis_from_env(name: &str) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map(Duration::milliseconds)
        .unwrap_or_else(Duration::zero)
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_expiration: Duration::zero(),
            cleanup_interval: Duration::zero(),
        }
    }
}
