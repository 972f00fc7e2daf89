use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a reaper pass as a whole.
///
/// Failures on individual files are logged and skipped instead.
#[derive(Debug, Error)]
pub enum ReapError {
    #[error("cannot list download directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
