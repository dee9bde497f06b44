//! Cache-aside coordinator.
//!
//! Looks a key up in the configured [`Cache`], and on a miss runs the producer
//! and stores its JSON-serialized result with a TTL. The cache is best-effort:
//! every cache failure is logged, counted and then ignored, so a call never
//! fails because of the cache layer.
//!
//! There is no single-flight guarantee. Concurrent callers that miss on the
//! same key each run their own producer.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ports::{Cache, CacheError};

/// How a lookup was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from the cache; the producer did not run.
    Hit,
    /// Not cached; the producer ran and its result was stored.
    Miss,
    /// No cache configured; the producer ran.
    Bypassed,
    /// A cache operation failed and was swallowed; the producer ran.
    Degraded,
}

/// A value together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub outcome: CacheOutcome,
}

/// Cache-aside coordinator over an optional cache backend.
#[derive(Clone)]
pub struct CacheAside {
    cache: Option<Arc<dyn Cache>>,
    swallowed: Arc<AtomicU64>,
}

impl CacheAside {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache: Some(cache),
            swallowed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Coordinator without a backend: every call goes straight to the producer.
    pub fn disabled() -> Self {
        Self {
            cache: None,
            swallowed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Name of the configured backend, or `"none"`.
    pub fn backend(&self) -> &'static str {
        self.cache.as_ref().map_or("none", |c| c.backend())
    }

    /// Number of cache failures swallowed since construction.
    pub fn swallowed_errors(&self) -> u64 {
        self.swallowed.load(Ordering::Relaxed)
    }

    /// Return the cached value for `key`, or run `producer`, cache its result
    /// for `ttl` and return it.
    ///
    /// The producer runs at most once and its error is returned unchanged.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_or_compute_traced(key, ttl, producer)
            .await
            .map(|cached| cached.value)
    }

    /// Same as [`get_or_compute`](Self::get_or_compute), also reporting the
    /// [`CacheOutcome`].
    pub async fn get_or_compute_traced<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<Cached<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(cache) = &self.cache else {
            let value = producer().await?;
            return Ok(Cached {
                value,
                outcome: CacheOutcome::Bypassed,
            });
        };

        let mut degraded = false;

        match cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!(key = %key, backend = cache.backend(), "Cache hit");
                    return Ok(Cached {
                        value,
                        outcome: CacheOutcome::Hit,
                    });
                }
                Err(e) => {
                    self.swallow(key, "decode", &CacheError::Serialization(e.to_string()));
                    degraded = true;
                }
            },
            Ok(None) => tracing::debug!(key = %key, backend = cache.backend(), "Cache miss"),
            Err(e) => {
                self.swallow(key, "read", &e);
                degraded = true;
            }
        }

        let value = producer().await?;

        let stored = match serde_json::to_string(&value) {
            Ok(raw) => cache.set(key, &raw, Some(ttl)).await,
            Err(e) => Err(CacheError::Serialization(e.to_string())),
        };
        if let Err(e) = stored {
            self.swallow(key, "write", &e);
            degraded = true;
        }

        let outcome = if degraded {
            CacheOutcome::Degraded
        } else {
            CacheOutcome::Miss
        };

        Ok(Cached { value, outcome })
    }

    fn swallow(&self, key: &str, operation: &'static str, error: &CacheError) {
        self.swallowed.fetch_add(1, Ordering::Relaxed);
        tracing::warn!(
            key = %key,
            operation,
            backend = self.backend(),
            error = %error,
            "Cache error ignored, using origin"
        );
    }
}

impl std::fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("backend", &self.backend())
            .field("swallowed_errors", &self.swallowed_errors())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        page: u32,
        titles: Vec<String>,
    }

    fn payload() -> Payload {
        Payload {
            page: 1,
            titles: vec!["Heat".to_string(), "Ronin".to_string()],
        }
    }

    /// Map-backed cache that records TTLs and can be told to fail.
    #[derive(Default)]
    struct RecordingCache {
        entries: Mutex<HashMap<String, (String, Option<Duration>)>>,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl RecordingCache {
        fn entry(&self, key: &str) -> Option<(String, Option<Duration>)> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn put(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), None));
        }
    }

    #[async_trait]
    impl Cache for RecordingCache {
        fn backend(&self) -> &'static str {
            "recording"
        }

        async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
            if self.fail_reads {
                return Err(CacheError::Connection("refused".to_string()));
            }
            Ok(self.entry(key).map(|(value, _)| value))
        }

        async fn set(
            &self,
            key: &str,
            value: &str,
            ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            if self.fail_writes {
                return Err(CacheError::Operation("read only replica".to_string()));
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), (value.to_string(), ttl));
            Ok(())
        }
    }

    async fn counted(calls: &AtomicUsize) -> Result<Payload, String> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(payload())
    }

    #[tokio::test]
    async fn test_miss_runs_producer_once_and_stores_json() {
        let cache = Arc::new(RecordingCache::default());
        let coordinator = CacheAside::new(cache.clone());
        let calls = AtomicUsize::new(0);

        let result = coordinator
            .get_or_compute_traced("movies_page_1", Duration::from_secs(1800), || {
                counted(&calls)
            })
            .await
            .unwrap();

        assert_eq!(result.value, payload());
        assert_eq!(result.outcome, CacheOutcome::Miss);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let (raw, ttl) = cache.entry("movies_page_1").unwrap();
        assert_eq!(ttl, Some(Duration::from_secs(1800)));
        assert_eq!(serde_json::from_str::<Payload>(&raw).unwrap(), payload());
    }

    #[tokio::test]
    async fn test_hit_skips_producer() {
        let cache = Arc::new(RecordingCache::default());
        cache.put("key", &serde_json::to_string(&payload()).unwrap());
        let coordinator = CacheAside::new(cache);
        let calls = AtomicUsize::new(0);

        let result = coordinator
            .get_or_compute_traced("key", Duration::from_secs(60), || counted(&calls))
            .await
            .unwrap();

        assert_eq!(result.value, payload());
        assert_eq!(result.outcome, CacheOutcome::Hit);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let coordinator = CacheAside::new(Arc::new(RecordingCache::default()));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Payload = coordinator
                .get_or_compute("key", Duration::from_secs(60), || counted(&calls))
                .await
                .unwrap();
            assert_eq!(value, payload());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_read_failure_falls_back_to_producer() {
        let cache = Arc::new(RecordingCache {
            fail_reads: true,
            ..Default::default()
        });
        let coordinator = CacheAside::new(cache);
        let calls = AtomicUsize::new(0);

        let result = coordinator
            .get_or_compute_traced("key", Duration::from_secs(60), || counted(&calls))
            .await
            .unwrap();

        assert_eq!(result.value, payload());
        assert_eq!(result.outcome, CacheOutcome::Degraded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.swallowed_errors(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_still_returns_value() {
        let cache = Arc::new(RecordingCache {
            fail_writes: true,
            ..Default::default()
        });
        let coordinator = CacheAside::new(cache.clone());
        let calls = AtomicUsize::new(0);

        let result = coordinator
            .get_or_compute_traced("key", Duration::from_secs(60), || counted(&calls))
            .await
            .unwrap();

        assert_eq!(result.value, payload());
        assert_eq!(result.outcome, CacheOutcome::Degraded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.swallowed_errors(), 1);
        assert!(cache.entry("key").is_none());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_recomputed_and_overwritten() {
        let cache = Arc::new(RecordingCache::default());
        cache.put("key", "{not json");
        let coordinator = CacheAside::new(cache.clone());
        let calls = AtomicUsize::new(0);

        let result = coordinator
            .get_or_compute_traced("key", Duration::from_secs(60), || counted(&calls))
            .await
            .unwrap();

        assert_eq!(result.outcome, CacheOutcome::Degraded);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let (raw, _) = cache.entry("key").unwrap();
        assert_eq!(serde_json::from_str::<Payload>(&raw).unwrap(), payload());
    }

    #[tokio::test]
    async fn test_disabled_cache_bypasses() {
        let coordinator = CacheAside::disabled();
        let calls = AtomicUsize::new(0);

        let result = coordinator
            .get_or_compute_traced("key", Duration::from_secs(60), || counted(&calls))
            .await
            .unwrap();

        assert_eq!(result.outcome, CacheOutcome::Bypassed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.backend(), "none");
        assert_eq!(coordinator.swallowed_errors(), 0);
    }

    #[tokio::test]
    async fn test_producer_error_propagates_and_nothing_is_stored() {
        let cache = Arc::new(RecordingCache::default());
        let coordinator = CacheAside::new(cache.clone());
        let calls = AtomicUsize::new(0);

        let result: Result<Payload, String> = coordinator
            .get_or_compute("key", Duration::from_secs(60), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("upstream timed out".to_string())
            })
            .await;

        assert_eq!(result.unwrap_err(), "upstream timed out");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.entry("key").is_none());
    }
}
