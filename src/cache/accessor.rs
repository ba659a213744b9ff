//! Cache-aside read-through accessor.
//!
//! Store failures are logged and absorbed; fetcher failures reach the caller
//! untouched. With no store configured every read goes to the fetcher.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::cache::single_flight::KeyLocks;
use crate::cache::stats::CacheStatsSnapshot;
use crate::cache::strategy::CacheCategory;
use crate::cache::StoreProvider;
use crate::config::Config;
use crate::error::{Result as StoreResult, StoreError};
use crate::store::KvStore;

/// TTL applied when a caller passes none.
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Upper bound for one store call unless configured otherwise.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);

// == Cache Accessor ==
/// Read-through cache in front of arbitrary async fetchers.
#[derive(Debug)]
pub struct CacheAccessor {
    provider: StoreProvider,
    default_ttl: u64,
    store_timeout: Duration,
    single_flight: Option<KeyLocks>,
}

impl CacheAccessor {
    /// Creates an accessor over `provider` with default TTL and timeout.
    pub fn new(provider: StoreProvider) -> Self {
        Self {
            provider,
            default_ttl: DEFAULT_TTL_SECONDS,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            single_flight: None,
        }
    }

    /// Creates an accessor from environment-derived configuration.
    pub fn from_config(config: &Config) -> Self {
        let accessor = Self::new(StoreProvider::from_config(config))
            .with_default_ttl(config.default_ttl)
            .with_store_timeout(config.store_timeout());

        if config.single_flight {
            accessor.with_single_flight()
        } else {
            accessor
        }
    }

    /// Accessor over an existing store.
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self::new(StoreProvider::with_store(store))
    }

    /// Accessor that always calls the fetcher.
    pub fn disabled() -> Self {
        Self::new(StoreProvider::disabled())
    }

    /// TTL, in seconds, for reads that pass no TTL of their own.
    pub fn with_default_ttl(mut self, ttl_seconds: u64) -> Self {
        self.default_ttl = ttl_seconds;
        self
    }

    /// Upper bound for each store call; slower calls count as store failures.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Coalesce concurrent misses on one key into a single fetch.
    pub fn with_single_flight(mut self) -> Self {
        self.single_flight = Some(KeyLocks::new());
        self
    }

    /// TTL applied when `get_cached` is given none.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// True when a store handle is available.
    pub fn is_enabled(&self) -> bool {
        self.provider.is_enabled()
    }

    // == Get Cached ==
    /// Returns the cached value for `key`, or runs `fetcher`, stores its
    /// result for `ttl_seconds` (default 300) and returns it.
    ///
    /// A hit never runs the fetcher. Errors from the fetcher are returned
    /// as-is; errors from the store only cost the cache for this call.
    ///
    /// # Examples
    ///
    /// ```
    /// use matchday_cache::cache::CacheAccessor;
    ///
    /// # tokio_test::block_on(async {
    /// let cache = CacheAccessor::disabled();
    /// let score: Result<u32, String> = cache
    ///     .get_cached("match:42", || async { Ok(2) }, Some(300))
    ///     .await;
    /// assert_eq!(score, Ok(2));
    /// # });
    /// ```
    pub async fn get_cached<T, E, F, Fut>(
        &self,
        key: &str,
        fetcher: F,
        ttl_seconds: Option<u64>,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(store) = self.provider.handle() else {
            return fetcher().await;
        };
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        match self.read(store.as_ref(), key).await {
            Ok(Some(value)) => {
                debug!(key, "cache hit");
                return Ok(value);
            }
            Ok(None) => debug!(key, "cache miss"),
            Err(error) => {
                warn!(key, %error, "cache read failed, fetching directly");
                return fetcher().await;
            }
        }

        let Some(locks) = &self.single_flight else {
            return self.fill(store.as_ref(), key, ttl, fetcher).await;
        };

        // Only misses queue on the key lock; whoever held it may have filled it.
        let _flight = locks.acquire(key).await;
        debug!(key, in_flight = locks.in_flight(), "cache key lock acquired");

        match self.read(store.as_ref(), key).await {
            Ok(Some(value)) => {
                debug!(key, "cache filled while waiting");
                Ok(value)
            }
            Ok(None) => self.fill(store.as_ref(), key, ttl, fetcher).await,
            Err(error) => {
                warn!(key, %error, "cache re-read failed, fetching directly");
                fetcher().await
            }
        }
    }

    /// Runs `fetcher` and stores its value. Write failures are only logged.
    async fn fill<T, E, F, Fut>(
        &self,
        store: &dyn KvStore,
        key: &str,
        ttl: u64,
        fetcher: F,
    ) -> Result<T, E>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let value = fetcher().await?;

        if let Err(error) = self.write(store, key, ttl, &value).await {
            warn!(key, %error, "cache write failed");
        }

        Ok(value)
    }

    /// [`get_cached`](Self::get_cached) with the category's TTL.
    pub async fn get_category<T, E, F, Fut>(
        &self,
        category: CacheCategory,
        key: &str,
        fetcher: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.get_cached(key, fetcher, Some(category.ttl_seconds()))
            .await
    }

    // == Invalidate ==
    /// Deletes every key matching the `*` glob `pattern`.
    ///
    /// Best effort: failures are logged, an unavailable store is a no-op.
    pub async fn invalidate_cache(&self, pattern: &str) {
        let Some(store) = self.provider.handle() else {
            return;
        };

        let keys = match self.bounded(store.keys(pattern)).await {
            Ok(keys) => keys,
            Err(error) => {
                warn!(pattern, %error, "cache invalidation failed to list keys");
                return;
            }
        };

        if keys.is_empty() {
            debug!(pattern, "cache invalidation matched no keys");
            return;
        }

        match self.bounded(store.del(&keys)).await {
            Ok(removed) => debug!(pattern, removed, "cache invalidated"),
            Err(error) => warn!(pattern, %error, "cache invalidation failed to delete keys"),
        }
    }

    /// Deletes exactly one key. Missing keys and store failures are no-ops.
    pub async fn invalidate_cache_key(&self, key: &str) {
        let Some(store) = self.provider.handle() else {
            return;
        };

        match self.bounded(store.del(&[key.to_string()])).await {
            Ok(removed) => debug!(key, removed, "cache key invalidated"),
            Err(error) => warn!(key, %error, "cache key invalidation failed"),
        }
    }

    // == Stats ==
    /// Snapshot of the store's keys grouped by prefix.
    ///
    /// Passthrough mode yields a disabled, zeroed snapshot; `None` only when
    /// the store fails to enumerate its keys.
    pub async fn cache_stats(&self) -> Option<CacheStatsSnapshot> {
        let Some(store) = self.provider.handle() else {
            return Some(CacheStatsSnapshot::disabled());
        };

        match self.bounded(store.keys("*")).await {
            Ok(keys) => Some(CacheStatsSnapshot::from_keys(keys)),
            Err(error) => {
                error!(%error, "cache stats unavailable");
                None
            }
        }
    }

    async fn read<T: DeserializeOwned>(&self, store: &dyn KvStore, key: &str) -> StoreResult<Option<T>> {
        match self.bounded(store.get(key)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize>(
        &self,
        store: &dyn KvStore,
        key: &str,
        ttl: u64,
        value: &T,
    ) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.bounded(store.setex(key, ttl, &raw)).await
    }

    async fn bounded<R>(&self, op: impl Future<Output = StoreResult<R>>) -> StoreResult<R> {
        tokio::time::timeout(self.store_timeout, op)
            .await
            .map_err(|_| StoreError::Timeout)?
    }
}
