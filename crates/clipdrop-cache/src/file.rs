use async_trait::async_trait;
use clipdrop_core::clock::elapsed_since;
use clipdrop_core::{CacheError, Clock, Fingerprint, ResponseCache, SystemClock, VideoResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Type alias for cache results.
type Result<T> = std::result::Result<T, CacheError>;

/// A response cache stored as one JSON file per URL.
///
/// Entries live at `{dir}/{fingerprint}.json`. The file's modification time
/// is the entry timestamp and is set from the cache's clock on every store:
/// an entry at least `ttl` old is ignored and gets overwritten by the next
/// store for the same URL. Nothing is ever deleted.
#[derive(Clone)]
pub struct FileResponseCache {
    dir: PathBuf,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl FileResponseCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self::with_clock(dir, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            ttl,
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.dir.join(format!("{fingerprint}.json"))
    }

    async fn read_fresh(&self, fingerprint: &Fingerprint) -> Result<Option<VideoResult>> {
        let path = self.entry_path(fingerprint);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let age = elapsed_since(self.clock.now(), metadata.modified()?).ok_or_else(|| {
            CacheError::InvalidData(format!("unrepresentable mtime on {}", path.display()))
        })?;
        if age >= self.ttl {
            debug!(fingerprint = %fingerprint, age_secs = age.as_secs(), "Cache entry is stale");
            return Ok(None);
        }

        let bytes = fs::read(&path).await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn write(&self, fingerprint: &Fingerprint, record: &VideoResult) -> Result<()> {
        let bytes = serde_json::to_vec(record)?;
        let path = self.entry_path(fingerprint);
        // Write beside the entry, then rename, so readers never see a partial file.
        let staging = self.dir.join(format!("{fingerprint}.{}.tmp", Uuid::new_v4()));

        if let Err(e) = self.write_staging(&staging, &bytes).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&staging, &path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn write_staging(&self, staging: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = fs::File::create(staging).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        // the entry timestamp comes from the same clock lookups read
        file.into_std()
            .await
            .set_modified(SystemTime::from(self.clock.now()))?;
        Ok(())
    }
}

#[async_trait]
impl ResponseCache for FileResponseCache {
    async fn lookup(&self, url: &str) -> Option<VideoResult> {
        let fingerprint = Fingerprint::of(url);
        trace!(fingerprint = %fingerprint, "Looking up file cache");

        match self.read_fresh(&fingerprint).await {
            Ok(Some(record)) => {
                debug!(fingerprint = %fingerprint, "Cache hit on disk");
                Some(record)
            }
            Ok(None) => {
                trace!(fingerprint = %fingerprint, "Cache miss on disk");
                None
            }
            Err(e) => {
                warn!(fingerprint = %fingerprint, error = %e, "Unreadable cache entry, treating as miss");
                None
            }
        }
    }

    async fn store(&self, url: &str, record: &VideoResult) {
        let fingerprint = Fingerprint::of(url);

        match self.write(&fingerprint, record).await {
            Ok(()) => debug!(fingerprint = %fingerprint, "Stored cache entry on disk"),
            Err(e) => warn!(fingerprint = %fingerprint, error = %e, "Failed to store cache entry"),
        }
    }
}
