//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use muse_infra::TmdbConfig;
#[cfg(feature = "redis")]
use muse_infra::RedisConfig;

/// Default lifetime of a cached `/movies` payload.
const DEFAULT_MOVIES_CACHE_TTL_SECS: u64 = 1800;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub tmdb: TmdbConfig,
    /// `None` runs without Redis.
    #[cfg(feature = "redis")]
    pub redis: Option<RedisConfig>,
    pub movies_cache_ttl: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),
            tmdb: TmdbConfig::from_env(),
            #[cfg(feature = "redis")]
            redis: RedisConfig::from_env(),
            movies_cache_ttl: Duration::from_secs(
                env::var("MOVIES_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_MOVIES_CACHE_TTL_SECS),
            ),
        }
    }
}
