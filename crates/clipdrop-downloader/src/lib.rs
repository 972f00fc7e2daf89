//! Download pipeline for Clipdrop.
//!
//! [`DownloadService`] runs one extraction end to end: cache lookup, the
//! extraction tool, metadata shaping, the stale file reaper and the cache
//! write. [`BoundedDispatcher`] runs any [`Downloader`] on its own task with
//! a hard deadline.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clipdrop_core::Settings;
//! use clipdrop_downloader::{BoundedDispatcher, DownloadService, Downloader, Reaper, YtDlpExtractor};
//! # use clipdrop_core::{ResponseCache, VideoResult};
//! # struct NoCache;
//! # #[async_trait::async_trait]
//! # impl ResponseCache for NoCache {
//! #     async fn lookup(&self, _: &str) -> Option<VideoResult> { None }
//! #     async fn store(&self, _: &str, _: &VideoResult) {}
//! # }
//!
//! # async fn example() {
//! let settings = Arc::new(Settings::builder().download_dir("downloads").cache_dir("cache").build());
//! let reaper = Reaper::new(&settings.download_dir, settings.file_max_age);
//! let service = DownloadService::new(YtDlpExtractor::default(), NoCache, reaper, settings.clone());
//! let dispatcher = BoundedDispatcher::new(service, settings.dispatch_deadline);
//!
//! let record = dispatcher.download("https://www.tiktok.com/@someone/video/1").await;
//! println!("{record:?}");
//! # }
//! ```

pub mod counter;
pub mod dispatcher;
pub mod downloader;
pub mod error;
pub mod reaper;
pub mod service;
pub mod ytdlp;

pub use dispatcher::BoundedDispatcher;
pub use downloader::Downloader;
pub use error::ReapError;
pub use reaper::Reaper;
pub use service::DownloadService;
pub use ytdlp::YtDlpExtractor;
