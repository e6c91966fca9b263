//! Utility functions used across the application.
//!
//! - [`code_generator`] - Random short code generation
//! - [`client_identifier`] - Rate-limit key extraction from HTTP requests

pub mod client_identifier;
pub mod code_generator;
