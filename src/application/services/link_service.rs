//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::{CodeGenerator, LinkRepository};
use crate::error::AppError;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, warn};

/// Number of candidate codes probed before the service stops retrying.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Service for creating and resolving shortened links.
///
/// Codes come from a [`CodeGenerator`] and are checked against the
/// [`LinkRepository`] before saving. The probe and the save are separate
/// store operations, so two concurrent creations can still pick the same code;
/// the later save wins.
pub struct LinkService<L: LinkRepository, G: CodeGenerator> {
    link_repository: Arc<L>,
    code_generator: Arc<G>,
}

impl<L: LinkRepository, G: CodeGenerator> LinkService<L, G> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, code_generator: Arc<G>) -> Self {
        Self {
            link_repository,
            code_generator,
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// # Code Assignment
    ///
    /// Up to [`MAX_CODE_ATTEMPTS`] candidates are probed with
    /// [`LinkRepository::exists`]. The bound is best effort: if every candidate
    /// collides, the last one is saved anyway and overwrites the existing link.
    ///
    /// # Returns
    ///
    /// The link as persisted, including any expiry stamped by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` (or the generated code) is empty.
    ///
    /// Returns [`AppError::Internal`] if the existence probe or the save fails;
    /// the details name the failing operation.
    pub async fn create_short_link(&self, long_url: String) -> Result<Link, AppError> {
        let code = self.assign_code().await?;

        let link = Link::new(code, long_url, Utc::now());
        link.validate()?;

        let link = self
            .link_repository
            .save(link)
            .await
            .map_err(|e| store_failure("save", "Failed to save short link", e))?;

        debug!(code = %link.code, expires_at = ?link.expires_at, "Short link created");
        Ok(link)
    }

    /// Resolves a short code to its long URL.
    ///
    /// Expiry is checked here, so a link past its `expires_at` is reported
    /// missing even if the store has not swept it yet.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown or expired.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn get_long_url(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    e
                } else {
                    store_failure("find_by_code", "Failed to look up short link", e)
                }
            })?;

        if link.is_expired() {
            debug!(code, "Short link expired");
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        Ok(link.long_url)
    }

    /// Constructs the full short URL from the public base URL and a code.
    pub fn get_short_url(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }

    /// Draws candidates until one is free or the attempt bound is reached.
    async fn assign_code(&self) -> Result<String, AppError> {
        let mut code = self.code_generator.generate();
        let mut attempt = 1;

        while self
            .link_repository
            .exists(&code)
            .await
            .map_err(|e| store_failure("exists", "Failed to check short code existence", e))?
        {
            if attempt == MAX_CODE_ATTEMPTS {
                warn!(
                    code = %code,
                    attempts = attempt,
                    "Short code collisions exhausted retries, existing link will be overwritten"
                );
                break;
            }

            debug!(code = %code, attempt, "Short code collision, retrying");
            code = self.code_generator.generate();
            attempt += 1;
        }

        Ok(code)
    }
}

fn store_failure(operation: &'static str, message: &str, source: AppError) -> AppError {
    AppError::internal(
        message,
        json!({ "operation": operation, "reason": source.to_string() }),
    )
}
