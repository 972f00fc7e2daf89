use crate::error::{GatewayError, Result};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use std::io::ErrorKind;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

pub async fn download_handler(
    Path(filename): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    if !is_servable_name(&filename) {
        debug!(file = %filename, "Refusing to serve file name");
        return Err(GatewayError::NotFound);
    }

    let path = state.settings().download_path(&filename);
    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(GatewayError::NotFound),
        Err(e) => {
            error!(file = %filename, error = %e, "Cannot open download");
            return Err(e.into());
        }
    };
    if !file.metadata().await?.is_file() {
        return Err(GatewayError::NotFound);
    }

    let disposition = format!("attachment; filename=\"tiktok_video_{filename}.mp4\"");
    Ok((
        [
            (CONTENT_TYPE, "video/mp4".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

/// Only plain file names are served: no separators, no hidden files.
fn is_servable_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn servable_names() {
        assert!(is_servable_name("0b9f6c1e-8d0e-4d8e-9a43-2f5b9d3c7a10.mp4"));
        assert!(!is_servable_name(""));
        assert!(!is_servable_name("../secret"));
        assert!(!is_servable_name(".hidden"));
        assert!(!is_servable_name("a/b.mp4"));
        assert!(!is_servable_name("a\\b.mp4"));
        assert!(!is_servable_name("quote\".mp4"));
    }
}
