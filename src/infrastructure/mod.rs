//! Infrastructure layer implementing the domain traits in memory.
//!
//! All state lives in process memory and is lost on restart.
//!
//! # Modules
//!
//! - [`persistence`] - TTL-indexed link store
//! - [`rate_limit`] - Fixed-window rate limiter
//! - [`sweeper`] - Background eviction task shared by both

pub mod persistence;
pub mod rate_limit;
pub mod sweeper;
