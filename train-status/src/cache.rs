//! Caching layer for stop-history responses.
//!
//! Every status request normally triggers one fetch. When the page is open
//! on several screens at once that multiplies load on a public feed, so a
//! short time-to-live cache can be switched on. It is off by default.
//!
//! Only successful responses are cached; errors always reach the caller.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StopRecord;
use crate::feed::{FeedClient, FeedError, StopHistoryQuery};

/// Cached stop history entry.
type HistoryEntry = Arc<Vec<StopRecord>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries. `None` disables caching.
    pub ttl: Option<Duration>,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// A disabled cache: every lookup goes to the feed.
    pub fn disabled() -> Self {
        Self {
            ttl: None,
            max_capacity: 16,
        }
    }

    /// Cache successful responses for `secs` seconds (0 disables).
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Cache for stop histories, keyed by query (trip pattern and days).
pub struct HistoryCache {
    entries: MokaCache<StopHistoryQuery, HistoryEntry>,
}

impl HistoryCache {
    /// Create a new cache with the given TTL.
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let entries = MokaCache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();

        Self { entries }
    }

    /// Get a cached entry.
    pub async fn get(&self, key: &StopHistoryQuery) -> Option<HistoryEntry> {
        self.entries.get(key).await
    }

    /// Insert an entry into the cache.
    pub async fn insert(&self, key: StopHistoryQuery, entry: HistoryEntry) {
        self.entries.insert(key, entry).await;
    }
}

/// Feed client with optional caching.
///
/// Wraps a `FeedClient`; with caching disabled it is a plain passthrough.
pub struct CachedFeedClient {
    client: FeedClient,
    cache: Option<HistoryCache>,
}

impl CachedFeedClient {
    /// Create a new cached client.
    pub fn new(client: FeedClient, config: &CacheConfig) -> Self {
        let cache = config
            .ttl
            .map(|ttl| HistoryCache::new(ttl, config.max_capacity));

        Self { client, cache }
    }

    /// Whether responses are being cached.
    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    /// Fetch the stop history, using the cache if enabled.
    pub async fn fetch_stop_history(
        &self,
        query: &StopHistoryQuery,
    ) -> Result<HistoryEntry, FeedError> {
        let Some(cache) = &self.cache else {
            return Ok(Arc::new(self.client.fetch_stop_history(query).await?));
        };

        if let Some(cached) = cache.get(query).await {
            return Ok(cached);
        }

        let entry = Arc::new(self.client.fetch_stop_history(query).await?);
        cache.insert(query.clone(), Arc::clone(&entry)).await;

        Ok(entry)
    }
}
