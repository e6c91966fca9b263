//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_code": "aB3",
///   "long_url": "https://example.com",
///   "short_url": "http://localhost:8181/aB3",
///   "expires_at": "2026-10-19T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or malformed.
/// Returns 500 Internal Server Error if the store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_short_link(payload.url).await?;
    let short_url = state.link_service.get_short_url(&state.base_url, &link.code);

    tracing::info!(code = %link.code, "Short link created");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_code: link.code,
            long_url: link.long_url,
            short_url,
            expires_at: link.expires_at,
        }),
    ))
}
