//! Per-client rate limiting middleware.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{AppError, RETRY_AFTER_DETAIL, RETRY_AFTER_SECONDS};
use crate::state::AppState;
use crate::utils::client_identifier::client_identifier;

/// Admits or rejects a request using the configured [`crate::domain::repositories::RateLimiter`].
///
/// # Key Extraction
///
/// Requests are keyed by peer IP, or by `X-Forwarded-For` / `X-Real-IP` when
/// the service runs behind a trusted proxy (see
/// [`crate::utils::client_identifier::client_identifier`]).
///
/// # Behaviour
///
/// - Rate limiting disabled: request passes through
/// - Limiter admits: request passes through
/// - Limiter rejects: `429 Too Many Requests`, `Retry-After` set to the seconds
///   left in the client's window
/// - Limiter fails: logged, request passes through (fail open)
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(limiter) = st.rate_limiter.as_ref() else {
        return Ok(next.run(req).await);
    };

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let identifier = client_identifier(req.headers(), peer, st.behind_proxy);

    match limiter.allow(&identifier).await {
        Ok(true) => {}
        Ok(false) => {
            let retry_after = limiter
                .retry_after(&identifier)
                .map_or(RETRY_AFTER_SECONDS, whole_seconds);
            debug!(client = %identifier, retry_after, "Rate limit exceeded");
            return Err(AppError::rate_limited(
                "Too many requests. Please try again later.",
                json!({ RETRY_AFTER_DETAIL: retry_after }),
            ));
        }
        Err(e) => {
            warn!(client = %identifier, error = %e, "Rate limiter failed, allowing request");
        }
    }

    Ok(next.run(req).await)
}

/// Rounds up, never below one second.
fn whole_seconds(remaining: Duration) -> u64 {
    let seconds = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    seconds.max(1)
}
