use serde::{Deserialize, Serialize};

/// Upper bound, in characters, for error messages shown to the user.
pub const MAX_MESSAGE_LEN: usize = 100;
/// Upper bound, in characters, for video titles.
pub const MAX_TITLE_LEN: usize = 100;

pub const INVALID_URL_MESSAGE: &str = "Invalid TikTok URL";
pub const TIMEOUT_MESSAGE: &str = "Timeout: processing took too long";

/// Metadata of a successfully downloaded video.
///
/// Counters are already formatted for display (`"1.5K"`, `"2.3M"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    /// Length of the video in whole seconds.
    pub duration: u64,
    pub uploader: String,
    pub like_count: String,
    pub comment_count: String,
    pub repost_count: String,
    pub view_count: String,
    pub thumbnail: Option<String>,
    /// Name of the downloaded file inside the download directory.
    pub file: String,
}

/// Outcome of one extraction request.
///
/// Serialized untagged: a success is the flat [`VideoInfo`] object and a
/// failure is `{"error": "..."}`, which is also the on-disk cache layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VideoResult {
    Ready(VideoInfo),
    Failed { error: String },
}

impl VideoResult {
    /// Builds a failure record, truncating the message to [`MAX_MESSAGE_LEN`].
    pub fn failed(message: impl AsRef<str>) -> Self {
        VideoResult::Failed {
            error: truncate_chars(message.as_ref(), MAX_MESSAGE_LEN),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, VideoResult::Ready(_))
    }

    /// Returns the error message if this is a failure record.
    pub fn error(&self) -> Option<&str> {
        match self {
            VideoResult::Ready(_) => None,
            VideoResult::Failed { error } => Some(error),
        }
    }
}

/// Truncates `value` to at most `max` characters without splitting a code point.
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((end, _)) => value[..end].to_string(),
        None => value.to_string(),
    }
}
