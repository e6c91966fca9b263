//! Link entity representing a short code to long URL mapping.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::AppError;

/// A shortened URL record.
///
/// `expires_at` is stamped by the store at write time (`created_at` is set by the
/// service) and is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a link with no expiry.
    pub fn new(code: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            long_url,
            created_at,
            expires_at: None,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if the link is expired relative to `now`.
    ///
    /// A link expiring exactly at `now` is still live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now > e)
    }

    /// Rejects links with an empty long URL or an empty short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the offending field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.long_url.is_empty() {
            return Err(AppError::bad_request(
                "Long URL must not be empty",
                json!({ "field": "long_url" }),
            ));
        }
        if self.code.is_empty() {
            return Err(AppError::bad_request(
                "Short code must not be empty",
                json!({ "field": "code" }),
            ));
        }
        Ok(())
    }
}
