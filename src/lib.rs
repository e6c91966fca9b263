//! # Shortlink
//!
//! An in-memory URL shortener built with Axum: short codes map to long URLs,
//! links expire after a configurable TTL, and clients are throttled with a
//! fixed-window rate limiter.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::entities::Link`] record and the store,
//!   limiter and code generator traits
//! - **Application Layer** ([`application`]) - Code assignment with collision retry and
//!   expiry-aware resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory store and limiter, each with
//!   a background sweep
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## State and Lifecycle
//!
//! All state lives in memory and is lost on restart. The store and the limiter
//! each own one background sweep task, stopped by `close()` (idempotent) or on drop.
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:8181"
//! export STORAGE_TTL_SECONDS=86400
//! cargo run
//!
//! curl -X POST localhost:8181/shorten -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::Link;
    pub use crate::domain::repositories::{CodeGenerator, LinkRepository, RateLimiter};
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::MemoryLinkRepository;
    pub use crate::infrastructure::rate_limit::MemoryRateLimiter;
    pub use crate::state::AppState;
    pub use crate::utils::code_generator::RandomCodeGenerator;
}
