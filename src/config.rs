//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache and development server configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint of the REST key-value store
    pub kv_rest_url: Option<String>,
    /// Bearer token for the REST key-value store
    pub kv_rest_token: Option<String>,
    /// TTL in seconds used when a caller passes none
    pub default_ttl: u64,
    /// Upper bound for a single store call in milliseconds
    pub store_timeout_ms: u64,
    /// Coalesce concurrent misses on the same key
    pub single_flight: bool,
    /// HTTP port of the development server
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Token the development server requires, if any
    pub server_token: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KV_REST_API_URL` - REST store endpoint (default: unset, cache disabled)
    /// - `KV_REST_API_TOKEN` - REST store token (default: unset, cache disabled)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_STORE_TIMEOUT_MS` - Store call timeout (default: 2000)
    /// - `CACHE_SINGLE_FLIGHT` - Coalesce concurrent misses (default: false)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `SERVER_TOKEN` - Bearer token for the development server (default: unset)
    pub fn from_env() -> Self {
        Self {
            kv_rest_url: non_empty_var("KV_REST_API_URL"),
            kv_rest_token: non_empty_var("KV_REST_API_TOKEN"),
            default_ttl: parsed_var("DEFAULT_TTL").unwrap_or(300),
            store_timeout_ms: parsed_var("CACHE_STORE_TIMEOUT_MS").unwrap_or(2000),
            single_flight: env::var("CACHE_SINGLE_FLIGHT")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            server_port: parsed_var("SERVER_PORT").unwrap_or(3000),
            cleanup_interval: parsed_var("CLEANUP_INTERVAL").unwrap_or(1),
            server_token: non_empty_var("SERVER_TOKEN"),
        }
    }

    /// Store call timeout as a Duration.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kv_rest_url: None,
            kv_rest_token: None,
            default_ttl: 300,
            store_timeout_ms: 2000,
            single_flight: false,
            server_port: 3000,
            cleanup_interval: 1,
            server_token: None,
        }
    }
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
