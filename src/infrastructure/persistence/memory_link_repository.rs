//! In-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::sweeper::Sweeper;

/// Interval between sweep passes unless overridden.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

type LinkMap = HashMap<String, Link>;

/// Link store keyed by short code.
///
/// The whole table sits behind one reader/writer lock: lookups and existence
/// probes take it shared, saves and sweep passes take it exclusive. A
/// background [`Sweeper`] deletes expired links; readers must still check
/// expiry themselves because a link can expire between passes.
///
/// Must be constructed inside a Tokio runtime.
#[derive(Debug)]
pub struct MemoryLinkRepository {
    links: Arc<RwLock<LinkMap>>,
    ttl: Option<TimeDelta>,
    sweeper: Sweeper,
}

impl MemoryLinkRepository {
    /// Creates a store that stamps `expires_at = now + ttl` on every save.
    ///
    /// A zero `ttl` disables expiry.
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a store with a custom sweep interval.
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Self {
        let links = Arc::new(RwLock::new(LinkMap::new()));

        let sweep_links = Arc::clone(&links);
        let sweeper = Sweeper::spawn("links", sweep_interval, move || {
            sweep_expired(&sweep_links, Utc::now())
        });

        let ttl = (!ttl.is_zero()).then(|| TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX));

        Self {
            links,
            ttl,
            sweeper,
        }
    }

    /// Stops the background sweep. Safe to call more than once.
    pub fn close(&self) {
        self.sweeper.stop();
    }

    /// Returns true once [`Self::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.sweeper.is_stopped()
    }

    /// Returns false once a writer panicked while holding the table lock.
    ///
    /// Every later save and lookup fails with [`AppError::Internal`].
    pub fn is_available(&self) -> bool {
        !self.links.is_poisoned()
    }

    /// Number of stored links, including expired ones awaiting a sweep.
    ///
    /// Reports 0 when the store is unavailable; see [`Self::is_available`].
    pub fn len(&self) -> usize {
        self.links.read().map(|links| links.len()).unwrap_or(0)
    }

    /// Returns true if no links are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deletes every link expired as of `now`, returning how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        sweep_expired(&self.links, now)
    }

    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let links = Arc::clone(&self.links);
        let _ = std::thread::spawn(move || {
            let _guard = links.write();
            panic!("writer panicked while holding the link table");
        })
        .join();
    }
}

fn sweep_expired(links: &RwLock<LinkMap>, now: DateTime<Utc>) -> usize {
    let Ok(mut links) = links.write() else {
        tracing::error!("Link store lock poisoned, skipping sweep");
        return 0;
    };

    let before = links.len();
    links.retain(|_, link| !link.is_expired_at(now));
    before - links.len()
}

fn store_unavailable(operation: &str) -> AppError {
    AppError::internal(
        "Link store unavailable",
        json!({ "operation": operation, "reason": "lock poisoned" }),
    )
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn save(&self, mut link: Link) -> Result<Link, AppError> {
        let mut links = self.links.write().map_err(|_| store_unavailable("save"))?;

        if let Some(ttl) = self.ttl {
            link.expires_at = Utc::now().checked_add_signed(ttl);
        }

        links.insert(link.code.clone(), link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Link, AppError> {
        let links = self
            .links
            .read()
            .map_err(|_| store_unavailable("find_by_code"))?;

        links.get(code).cloned().ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "code": code }))
        })
    }

    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        let links = self.links.read().map_err(|_| store_unavailable("exists"))?;
        Ok(links.contains_key(code))
    }
}
