//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The link store or rate limiter lock is poisoned,
///   or the link store sweep has been stopped
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "link_store": { "status": "ok", "message": "42 links stored" },
///     "rate_limiter": { "status": "ok", "message": "enabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_link_store(&state);
    let limiter_check = check_rate_limiter(&state);

    let all_healthy = store_check.is_ok() && limiter_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            link_store: store_check,
            rate_limiter: limiter_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_link_store(state: &AppState) -> CheckStatus {
    if !state.link_repository.is_available() {
        CheckStatus::error("Link store unavailable")
    } else if state.link_repository.is_closed() {
        CheckStatus::error("Expiry sweep stopped")
    } else {
        CheckStatus::ok(format!("{} links stored", state.link_repository.len()))
    }
}

fn check_rate_limiter(state: &AppState) -> CheckStatus {
    match &state.rate_limiter {
        Some(limiter) if !limiter.is_available() => {
            CheckStatus::error("Rate limiter unavailable")
        }
        Some(_) => CheckStatus::ok("enabled"),
        None => CheckStatus::ok("disabled"),
    }
}
