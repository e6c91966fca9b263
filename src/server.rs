//! HTTP server initialization and runtime setup.
//!
//! Builds the in-memory store and rate limiter, serves the Axum app and stops
//! the background sweeps once the server has shut down.

use crate::config::Config;
use crate::domain::repositories::RateLimiter;
use crate::infrastructure::persistence::MemoryLinkRepository;
use crate::infrastructure::rate_limit::MemoryRateLimiter;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory link store with TTL sweep
/// - Fixed-window rate limiter (if enabled)
/// - Axum HTTP server with graceful shutdown on Ctrl-C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = Arc::new(MemoryLinkRepository::new(config.storage_ttl()));
    tracing::info!("Link store ready");

    let rate_limiter = config.rate_limiter_enabled.then(|| {
        Arc::new(MemoryRateLimiter::new(
            config.rate_limit,
            config.rate_limit_window(),
        ))
    });
    if rate_limiter.is_some() {
        tracing::info!("Rate limiter enabled");
    } else {
        tracing::info!("Rate limiter disabled");
    }

    let state = AppState::new(
        Arc::clone(&link_repository),
        rate_limiter
            .clone()
            .map(|limiter| limiter as Arc<dyn RateLimiter>),
        config.base_url.clone(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    link_repository.close();
    if let Some(limiter) = rate_limiter {
        limiter.close();
    }
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
