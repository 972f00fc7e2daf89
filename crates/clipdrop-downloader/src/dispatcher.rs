use crate::downloader::Downloader;
use async_trait::async_trait;
use clipdrop_core::record::TIMEOUT_MESSAGE;
use clipdrop_core::VideoResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Runs a [`Downloader`] on its own task and waits for it with a deadline.
///
/// When the deadline passes first, the caller gets a timeout record and the
/// task is abandoned, not cancelled: it keeps running to completion, and
/// anything it produces (the downloaded file, the cache entry) shows up for
/// later requests. There is no cancellation; if the extraction tool ever
/// supports interruption, a cancellation token could be threaded through
/// [`Downloader::download`].
pub struct BoundedDispatcher<D> {
    inner: Arc<D>,
    deadline: Duration,
}

impl<D: Downloader> BoundedDispatcher<D> {
    pub fn new(inner: D, deadline: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            deadline,
        }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl<D: Downloader> Downloader for BoundedDispatcher<D> {
    async fn download(&self, url: &str) -> VideoResult {
        let inner = Arc::clone(&self.inner);
        let owned_url = url.to_string();
        let task = tokio::spawn(async move { inner.download(&owned_url).await });

        match tokio::time::timeout(self.deadline, task).await {
            Ok(Ok(record)) => record,
            Ok(Err(e)) => {
                error!(url, error = %e, "Download task failed");
                VideoResult::failed(format!("Error: {e}"))
            }
            Err(_) => {
                // Dropping the join handle detaches the task; it runs on.
                warn!(url, deadline_secs = self.deadline.as_secs_f64(), "Download exceeded deadline");
                VideoResult::failed(TIMEOUT_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::time::Instant;

    const URL: &str = "https://www.tiktok.com/@someone/video/1";
    const DEADLINE: Duration = Duration::from_secs(25);

    struct Never;

    #[async_trait]
    impl Downloader for Never {
        async fn download(&self, _url: &str) -> VideoResult {
            std::future::pending().await
        }
    }

    struct Sleepy {
        delay: Duration,
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Downloader for Sleepy {
        async fn download(&self, _url: &str) -> VideoResult {
            tokio::time::sleep(self.delay).await;
            self.finished.store(true, Ordering::SeqCst);
            VideoResult::failed("done")
        }
    }

    struct Panics;

    #[async_trait]
    impl Downloader for Panics {
        async fn download(&self, _url: &str) -> VideoResult {
            panic!("extractor blew up")
        }
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl Downloader for Counting {
        async fn download(&self, url: &str) -> VideoResult {
            self.0.fetch_add(1, Ordering::SeqCst);
            VideoResult::failed(url)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn never_returning_download_times_out_at_deadline() {
        let dispatcher = BoundedDispatcher::new(Never, DEADLINE);
        let started = Instant::now();

        let record = dispatcher.download(URL).await;

        assert_eq!(record.error(), Some(TIMEOUT_MESSAGE));
        let elapsed = started.elapsed();
        assert!(elapsed >= DEADLINE, "timed out early: {elapsed:?}");
        assert!(elapsed < DEADLINE + Duration::from_secs(1), "timed out late: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn fast_download_returns_its_result() {
        let finished = Arc::new(AtomicBool::new(false));
        let dispatcher = BoundedDispatcher::new(
            Sleepy {
                delay: Duration::from_secs(3),
                finished: Arc::clone(&finished),
            },
            DEADLINE,
        );

        let record = dispatcher.download(URL).await;

        assert_eq!(record.error(), Some("done"));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_download_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let dispatcher = BoundedDispatcher::new(
            Sleepy {
                delay: Duration::from_secs(40),
                finished: Arc::clone(&finished),
            },
            DEADLINE,
        );

        let record = dispatcher.download(URL).await;
        assert_eq!(record.error(), Some(TIMEOUT_MESSAGE));
        assert!(!finished.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panicking_download_becomes_error_record() {
        let dispatcher = BoundedDispatcher::new(Panics, DEADLINE);

        let record = dispatcher.download(URL).await;

        let message = record.error().expect("expected an error record");
        assert!(message.starts_with("Error:"));
    }

    #[tokio::test]
    async fn passes_url_through() {
        let dispatcher = BoundedDispatcher::new(Counting(AtomicUsize::new(0)), DEADLINE);

        let record = dispatcher.download(URL).await;

        assert_eq!(record.error(), Some(URL));
        assert_eq!(dispatcher.inner.0.load(Ordering::SeqCst), 1);
    }
}
