use crate::counter::format_count;
use crate::downloader::Downloader;
use crate::reaper::Reaper;
use async_trait::async_trait;
use clipdrop_core::record::{truncate_chars, MAX_TITLE_LEN};
use clipdrop_core::{Extractor, Metadata, ResponseCache, Settings, VideoInfo, VideoResult};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

const DEFAULT_TITLE: &str = "TikTok Video";
const DEFAULT_UPLOADER: &str = "TikTok User";

/// Runs the extraction pipeline for one URL.
///
/// A fresh cache entry short-circuits everything. On a miss the extractor
/// downloads into a newly named file, the metadata is shaped into a
/// [`VideoInfo`], stale downloads are reaped and the outcome is cached.
pub struct DownloadService<E, C> {
    extractor: E,
    cache: C,
    reaper: Reaper,
    settings: Arc<Settings>,
}

impl<E: Extractor, C: ResponseCache> DownloadService<E, C> {
    pub fn new(extractor: E, cache: C, reaper: Reaper, settings: Arc<Settings>) -> Self {
        Self {
            extractor,
            cache,
            reaper,
            settings,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub async fn fetch(&self, url: &str) -> VideoResult {
        if let Some(cached) = self.cache.lookup(url).await {
            info!(url, "Serving cached result");
            return cached;
        }

        let file = format!("{}.mp4", Uuid::new_v4());
        let output = self.settings.download_path(&file);
        info!(url, file = %file, "Starting download");

        let record = match self.extractor.extract(url, &output).await {
            Ok(metadata) => {
                let info = shape(metadata, file);
                match self.reaper.reap().await {
                    Ok(removed) => debug!(removed, "Cleaned up stale downloads"),
                    Err(e) => warn!(error = %e, "Stale download cleanup failed"),
                }
                info!(url, file = %info.file, "Download finished");
                VideoResult::Ready(info)
            }
            Err(e) => {
                error!(url, error = %e, "Download failed");
                VideoResult::failed(format!("Error: {e}"))
            }
        };

        if record.is_ready() || self.settings.cache_failures {
            self.cache.store(url, &record).await;
        }
        record
    }
}

#[async_trait]
impl<E: Extractor, C: ResponseCache> Downloader for DownloadService<E, C> {
    async fn download(&self, url: &str) -> VideoResult {
        self.fetch(url).await
    }
}

/// Turns raw extractor metadata into the record shown to the user.
pub fn shape(metadata: Metadata, file: String) -> VideoInfo {
    let thumbnail = metadata
        .thumbnail
        .filter(|t| !t.is_empty())
        .or_else(|| {
            metadata
                .thumbnails
                .and_then(|candidates| candidates.into_iter().last())
                .and_then(|candidate| candidate.url)
        });
    let duration = metadata
        .duration
        .as_f64()
        .filter(|d| d.is_finite() && *d > 0.0)
        .map(|d| d.round() as u64)
        .unwrap_or(0);

    VideoInfo {
        title: truncate_chars(
            metadata.title.as_deref().unwrap_or(DEFAULT_TITLE),
            MAX_TITLE_LEN,
        ),
        duration,
        uploader: metadata
            .uploader
            .unwrap_or_else(|| DEFAULT_UPLOADER.to_string()),
        like_count: format_count(&metadata.like_count),
        comment_count: format_count(&metadata.comment_count),
        repost_count: format_count(&metadata.repost_count),
        view_count: format_count(&metadata.view_count),
        thumbnail,
        file,
    }
}
