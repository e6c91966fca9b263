//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Shape every stored short code has.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reject codes outside `[A-Za-z0-9_-]` without touching the store
/// 2. Resolve the code through [`crate::application::services::LinkService::get_long_url`]
/// 3. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 Not Found if the short code is unknown or expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !SHORT_CODE_REGEX.is_match(&code) {
        debug!(code, "Rejected malformed short code");
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let long_url = state.link_service.get_long_url(&code).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, long_url)]))
}
