//! Application layer services implementing business logic.
//!
//! Services orchestrate domain traits (store, generator) and provide a clean
//! API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution

pub mod services;
