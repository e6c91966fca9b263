//! Repository trait for short link storage.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short code to long URL mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-memory store with TTL sweep
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts or overwrites the link stored under `link.code`.
    ///
    /// Stores configured with a TTL stamp `expires_at = now + ttl`, replacing any
    /// value the caller set. Returns the link as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backing store is unavailable.
    async fn save(&self, link: Link) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// Expired links that have not been swept yet are returned as-is; callers
    /// enforce expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link is stored under `code`.
    /// Returns [`AppError::Internal`] if the backing store is unavailable.
    async fn find_by_code(&self, code: &str) -> Result<Link, AppError>;

    /// Returns whether a link is currently stored under `code`, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backing store is unavailable.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;
}
