use async_trait::async_trait;
use clipdrop_core::VideoResult;

#[async_trait]
pub trait Downloader: Send + Sync + 'static {
    /// Resolves `url` into a result record.
    /// Failures are reported as [`VideoResult::Failed`], never as a panic or error.
    async fn download(&self, url: &str) -> VideoResult;
}
