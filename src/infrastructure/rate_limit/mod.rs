//! Rate limiter implementations.
//!
//! - [`MemoryRateLimiter`] - Fixed-window counters keyed by client identifier

pub mod memory_rate_limiter;

pub use memory_rate_limiter::MemoryRateLimiter;
