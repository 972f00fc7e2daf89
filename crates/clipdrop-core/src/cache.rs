use crate::record::VideoResult;
use async_trait::async_trait;
use std::sync::Arc;

/// A best-effort cache of extraction results, keyed by source URL.
///
/// Implementations never surface failures: a lookup that cannot read or
/// parse its entry is a miss, and a store that cannot write is skipped.
/// Callers therefore need no error handling around the cache.
#[async_trait]
pub trait ResponseCache: Send + Sync + 'static {
    /// Returns the record stored for `url` if it is younger than the TTL.
    async fn lookup(&self, url: &str) -> Option<VideoResult>;

    /// Stores `record` for `url`, replacing any previous entry.
    async fn store(&self, url: &str, record: &VideoResult);
}

#[async_trait]
impl<C: ResponseCache + ?Sized> ResponseCache for Arc<C> {
    async fn lookup(&self, url: &str) -> Option<VideoResult> {
        (**self).lookup(url).await
    }

    async fn store(&self, url: &str, record: &VideoResult) {
        (**self).store(url, record).await
    }
}
