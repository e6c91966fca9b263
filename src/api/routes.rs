//! API route configuration.
//!
//! Every route here passes through [`crate::api::middleware::rate_limit`].

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public, rate-limited routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `GET  /{code}`  - Redirect to the long URL
pub fn limited_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
}
