use async_trait::async_trait;
use clipdrop_core::settings::DEFAULT_CACHE_TTL;
use clipdrop_core::{Fingerprint, ResponseCache, VideoResult};
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// An in-memory response cache using Moka.
///
/// Entries expire `ttl` after insertion, like the file cache, but do not
/// survive a restart.
#[derive(Debug, Clone)]
pub struct MokaResponseCache {
    cache: Cache<String, VideoResult>,
}

impl MokaResponseCache {
    /// Creates a cache with the default TTL and room for 10,000 entries.
    pub fn new() -> Self {
        Self::with_ttl(10_000, DEFAULT_CACHE_TTL)
    }

    /// Creates a cache with a custom capacity and time-to-live.
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }
}

impl Default for MokaResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResponseCache for MokaResponseCache {
    async fn lookup(&self, url: &str) -> Option<VideoResult> {
        let key = Fingerprint::of(url);
        trace!(fingerprint = %key, "Looking up Moka cache");

        let record = self.cache.get(key.as_str()).await;
        if record.is_some() {
            debug!(fingerprint = %key, "Cache hit in Moka");
        }
        record
    }

    async fn store(&self, url: &str, record: &VideoResult) {
        let key = Fingerprint::of(url);
        self.cache
            .insert(key.as_str().to_string(), record.clone())
            .await;
        debug!(fingerprint = %key, "Cached record in Moka");
    }
}

/// Configuration for creating a [`MokaResponseCache`] with custom settings.
#[derive(Debug, TypedBuilder)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = 10_000)]
    max_capacity: u64,
    /// Time-to-live for cache entries.
    #[builder(default = DEFAULT_CACHE_TTL)]
    ttl: Duration,
}

impl From<CacheConfig> for MokaResponseCache {
    fn from(config: CacheConfig) -> Self {
        MokaResponseCache::with_ttl(config.max_capacity, config.ttl)
    }
}
