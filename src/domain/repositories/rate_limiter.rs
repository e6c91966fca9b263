//! Rate limiter trait.

use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;

/// Per-client request admission.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::MemoryRateLimiter`] - in-memory fixed window
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records a request from `identifier` and reports whether it is admitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the limiter state is unavailable. Callers
    /// fail open on error.
    async fn allow(&self, identifier: &str) -> Result<bool, AppError>;

    /// Time until `identifier` is admitted again, if the limiter tracks it.
    fn retry_after(&self, _identifier: &str) -> Option<Duration> {
        None
    }

    /// Returns false when the limiter state can no longer be read.
    fn is_available(&self) -> bool {
        true
    }
}
