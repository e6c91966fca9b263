//! Domain layer containing business entities and data-layer contracts.
//!
//! This module is independent of infrastructure and presentation concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store, limiter and generator trait definitions
//!
//! # Request Flow
//!
//! 1. HTTP middleware asks a [`repositories::RateLimiter`] to admit the client
//! 2. [`crate::application::services::LinkService`] draws codes from a
//!    [`repositories::CodeGenerator`] and probes a [`repositories::LinkRepository`]
//! 3. The repository stamps the TTL and stores the [`entities::Link`]

pub mod entities;
pub mod repositories;
