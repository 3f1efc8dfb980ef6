//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default upstream endpoint (Last.fm web service root).
pub const DEFAULT_UPSTREAM_URL: &str = "http://ws.audioscrobbler.com/2.0/";

/// Server configuration parameters.
///
/// All values except the API key can be configured via environment variables
/// with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API key, never exposed to clients
    pub api_key: String,
    /// Upstream base URL
    pub upstream_url: String,
    /// Cache TTL in seconds
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds (0 disables the sweep task)
    pub sweep_interval: u64,
    /// Allowed CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `LASTFM_API_KEY` - Upstream API key (required)
    /// - `UPSTREAM_URL` - Upstream base URL (default: Last.fm web service)
    /// - `CACHE_TTL_SECS` - Cache TTL in seconds (default: 1800)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds, 0 disables (default: 300)
    /// - `ALLOWED_ORIGINS` - Comma-separated CORS origin allow-list (default: any)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("LASTFM_API_KEY")
            .map_err(|_| anyhow::anyhow!("LASTFM_API_KEY must be set"))?;

        Ok(Self {
            api_key,
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            cache_ttl: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1800),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            sweep_interval: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            cache_ttl: 1800,
            server_port: 8080,
            sweep_interval: 300,
            allowed_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 1800);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.sweep_interval, 300);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
    }

    // Env vars are process-global, so from_env is exercised in a single test
    // to avoid interference between parallel test threads.
    #[test]
    fn test_config_from_env() {
        env::remove_var("LASTFM_API_KEY");
        assert!(Config::from_env().is_err());

        env::set_var("LASTFM_API_KEY", "test-key");
        env::set_var("ALLOWED_ORIGINS", "http://localhost:5173, https://example.com,");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "https://example.com"]
        );

        env::remove_var("ALLOWED_ORIGINS");
        env::remove_var("LASTFM_API_KEY");
    }
}
