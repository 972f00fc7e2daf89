use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures of the download endpoint, answered as plain text.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("File not found")]
    NotFound,
    #[error("Error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::NotFound => StatusCode::NOT_FOUND,
            GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
