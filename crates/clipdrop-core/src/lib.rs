//! Core types and traits for the Clipdrop video downloader.
//!
//! This crate provides the result record shared by every layer, the
//! capability traits for the response cache and the extraction tool,
//! and the runtime settings constructed once at startup.

pub mod cache;
pub mod clock;
pub mod error;
pub mod extractor;
pub mod fingerprint;
pub mod record;
pub mod settings;

pub use cache::ResponseCache;
pub use clock::{Clock, SystemClock};
pub use error::{CacheError, ExtractError};
pub use extractor::{Extractor, Metadata, Thumbnail};
pub use fingerprint::Fingerprint;
pub use record::{VideoInfo, VideoResult};
pub use settings::Settings;

#[cfg(any(test, feature = "test-util"))]
pub use clock::ManualClock;
