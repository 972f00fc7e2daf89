use thiserror::Error;

/// Errors raised by the response cache backends.
///
/// These never leave a [`ResponseCache`](crate::ResponseCache) implementation:
/// reads degrade to a miss and writes are skipped.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("cache value is invalid: {0}")]
    InvalidData(String),
}

/// Errors raised by an [`Extractor`](crate::Extractor).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to launch extractor: {0}")]
    Launch(#[source] std::io::Error),
    #[error("{0}")]
    Failed(String),
    #[error("unreadable extractor output: {0}")]
    Output(#[from] serde_json::Error),
}
