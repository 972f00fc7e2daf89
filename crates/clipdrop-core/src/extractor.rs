use crate::error::ExtractError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// A tool that resolves a video URL, downloads the media to a given path,
/// and reports what it found.
///
/// Calls may fail for any reason and may take arbitrarily long.
#[async_trait]
pub trait Extractor: Send + Sync + 'static {
    async fn extract(&self, url: &str, output: &Path) -> Result<Metadata, ExtractError>;
}

/// Metadata bundle reported by an [`Extractor`].
///
/// Counters and duration are kept as raw JSON values because extraction
/// tools are not consistent about their types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Value,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub like_count: Value,
    #[serde(default)]
    pub comment_count: Value,
    #[serde(default)]
    pub repost_count: Value,
    #[serde(default)]
    pub view_count: Value,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Vec<Thumbnail>>,
}

/// A candidate thumbnail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: Option<String>,
}
