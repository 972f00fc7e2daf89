use crate::error::ReapError;
use clipdrop_core::clock::elapsed_since;
use clipdrop_core::{Clock, SystemClock};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

/// Deletes downloaded files older than a fixed age.
///
/// A pass is best-effort: a file that cannot be inspected or removed is
/// logged and skipped, and the scan carries on with the rest.
#[derive(Clone)]
pub struct Reaper {
    dir: PathBuf,
    max_age: Duration,
    clock: Arc<dyn Clock>,
}

impl Reaper {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self::with_clock(dir, max_age, Arc::new(SystemClock))
    }

    pub fn with_clock(dir: impl Into<PathBuf>, max_age: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            max_age,
            clock,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Runs one pass over the directory and returns how many files were removed.
    pub async fn reap(&self) -> Result<usize, ReapError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|source| ReapError::ListDir {
                path: self.dir.clone(),
                source,
            })?;
        let now = self.clock.now();
        let mut removed = 0;

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "Stopped reading download directory");
                    break;
                }
            };
            let path = entry.path();

            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Cannot inspect download");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            let age = match metadata.modified().ok().and_then(|m| elapsed_since(now, m)) {
                Some(age) => age,
                None => {
                    warn!(file = %path.display(), "Download has no usable modification time");
                    continue;
                }
            };
            if age <= self.max_age {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    info!(file = %path.display(), age_secs = age.as_secs(), "Removed stale download");
                    removed += 1;
                }
                Err(e) => warn!(file = %path.display(), error = %e, "Failed to remove stale download"),
            }
        }

        debug!(dir = %self.dir.display(), removed, "Reaper pass finished");
        Ok(removed)
    }
}
