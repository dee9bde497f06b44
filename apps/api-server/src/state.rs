//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use muse_core::CacheAside;
use muse_core::CatalogError;
use muse_core::ports::{MovieCatalog, RandomSource};
use muse_infra::{InMemoryCache, ThreadRandom, TmdbClient};

#[cfg(feature = "redis")]
use muse_infra::RedisCache;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn MovieCatalog>,
    pub cache: CacheAside,
    pub random: Arc<dyn RandomSource>,
    pub movies_cache_ttl: Duration,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let catalog = Arc::new(TmdbClient::new(config.tmdb.clone())?);
        let cache = build_cache(config).await;

        tracing::info!(cache = cache.backend(), "Application state initialized");

        Ok(Self::from_parts(
            catalog,
            cache,
            Arc::new(ThreadRandom),
            config.movies_cache_ttl,
        ))
    }

    pub fn from_parts(
        catalog: Arc<dyn MovieCatalog>,
        cache: CacheAside,
        random: Arc<dyn RandomSource>,
        movies_cache_ttl: Duration,
    ) -> Self {
        Self {
            catalog,
            cache,
            random,
            movies_cache_ttl,
        }
    }
}

/// Pick the cache backend. Any failure degrades to a weaker cache, never to a
/// startup error.
#[cfg(feature = "redis")]
async fn build_cache(config: &AppConfig) -> CacheAside {
    let Some(redis) = &config.redis else {
        tracing::warn!("REDIS_URL not set. Running without response cache.");
        return CacheAside::disabled();
    };

    match RedisCache::connect(redis).await {
        Ok(cache) => CacheAside::new(Arc::new(cache)),
        Err(e) if redis.fallback_to_memory => {
            tracing::warn!(error = %e, "Redis connection failed, using in-memory cache");
            CacheAside::new(Arc::new(InMemoryCache::new()))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis connection failed, continuing without caching");
            CacheAside::disabled()
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn build_cache(_config: &AppConfig) -> CacheAside {
    tracing::info!("Running without redis feature - using in-memory cache");
    CacheAside::new(Arc::new(InMemoryCache::new()))
}
