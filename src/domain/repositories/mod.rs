//! Trait definitions for the domain layer.
//!
//! These traits abstract the ephemeral data layer so services can be tested
//! against mocks and backed by alternative stores.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure` and `crate::utils`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Traits
//!
//! - [`LinkRepository`] - Short link save, lookup and existence probing
//! - [`RateLimiter`] - Per-client request admission
//! - [`CodeGenerator`] - Candidate short code source

pub mod code_generator;
pub mod link_repository;
pub mod rate_limiter;

pub use code_generator::CodeGenerator;
pub use link_repository::LinkRepository;
pub use rate_limiter::RateLimiter;

#[cfg(test)]
pub use code_generator::MockCodeGenerator;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
