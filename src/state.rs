//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::RateLimiter;
use crate::infrastructure::persistence::MemoryLinkRepository;
use crate::utils::code_generator::RandomCodeGenerator;

/// Link service wired to the in-memory store and random code generator.
pub type AppLinkService = LinkService<MemoryLinkRepository, RandomCodeGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    /// Store handle kept for health reporting and shutdown.
    pub link_repository: Arc<MemoryLinkRepository>,
    /// `None` when rate limiting is disabled.
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    /// Public prefix for generated short URLs.
    pub base_url: String,
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds the state around an existing store, wiring a [`LinkService`] with
    /// a [`RandomCodeGenerator`].
    pub fn new(
        link_repository: Arc<MemoryLinkRepository>,
        rate_limiter: Option<Arc<dyn RateLimiter>>,
        base_url: impl Into<String>,
        behind_proxy: bool,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            Arc::clone(&link_repository),
            Arc::new(RandomCodeGenerator::new()),
        ));

        Self {
            link_service,
            link_repository,
            rate_limiter,
            base_url: base_url.into(),
            behind_proxy,
        }
    }
}
