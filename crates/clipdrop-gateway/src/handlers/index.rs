use crate::page::render_page;
use crate::state::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;
use clipdrop_core::record::INVALID_URL_MESSAGE;
use clipdrop_core::VideoResult;
use serde::Deserialize;
use tracing::{debug, info, warn};

const ACCEPTED_HOST: &str = "tiktok.com";

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub url: String,
}

pub async fn index_handler() -> Html<String> {
    Html(render_page(None))
}

pub async fn submit_handler(
    State(state): State<AppState>,
    form: Result<Form<SubmitForm>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable form submission");
            return Html(render_page(Some(&VideoResult::failed(INVALID_URL_MESSAGE))));
        }
    };
    let url = form.url.trim();
    let record = match validate_url(url) {
        Ok(()) => {
            info!(url, "Received download request");
            state.downloader().download(url).await
        }
        Err(rejected) => {
            debug!(url, "Rejected submission");
            rejected
        }
    };
    Html(render_page(Some(&record)))
}

pub async fn not_found_handler() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(render_page(Some(&VideoResult::failed("Page not found")))),
    )
}

/// Accepts only non-empty input mentioning `tiktok.com`.
pub fn validate_url(url: &str) -> Result<(), VideoResult> {
    if url.is_empty() || !url.contains(ACCEPTED_HOST) {
        return Err(VideoResult::failed(INVALID_URL_MESSAGE));
    }
    Ok(())
}
