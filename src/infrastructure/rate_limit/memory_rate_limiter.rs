//! In-memory fixed-window rate limiter.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::repositories::RateLimiter;
use crate::error::AppError;
use crate::infrastructure::sweeper::Sweeper;

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u32,
    reset_time: Instant,
}

type BucketMap = HashMap<String, Bucket>;

/// Fixed-window request counter per client identifier.
///
/// The first request of a window opens a bucket with `count = 1` and
/// `reset_time = now + window`. Further requests increment the count until it
/// reaches `limit`; after that they are denied without counting until the
/// window has passed. Two back-to-back windows can therefore admit up to
/// `2 * limit` requests in a short span.
///
/// Stale buckets are deleted by a background [`Sweeper`] that runs once per
/// window unless configured otherwise. Must be constructed inside a Tokio runtime.
#[derive(Debug)]
pub struct MemoryRateLimiter {
    buckets: Arc<Mutex<BucketMap>>,
    limit: u32,
    window: Duration,
    sweeper: Sweeper,
}

impl MemoryRateLimiter {
    /// Creates a limiter admitting `limit` requests per `window`, sweeping every `window`.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::with_sweep_interval(limit, window, window)
    }

    /// Creates a limiter with a custom sweep interval.
    pub fn with_sweep_interval(limit: u32, window: Duration, sweep_interval: Duration) -> Self {
        let buckets = Arc::new(Mutex::new(BucketMap::new()));

        let sweep_buckets = Arc::clone(&buckets);
        let sweeper = Sweeper::spawn("rate_buckets", sweep_interval, move || {
            sweep_stale(&sweep_buckets, Instant::now())
        });

        Self {
            buckets,
            limit,
            window,
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

    /// Number of tracked client buckets, including stale ones awaiting a sweep.
    ///
    /// Reports 0 when the limiter is unavailable.
    pub fn tracked_clients(&self) -> usize {
        self.buckets.lock().map(|b| b.len()).unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let buckets = Arc::clone(&self.buckets);
        let _ = std::thread::spawn(move || {
            let _guard = buckets.lock();
            panic!("request panicked while holding the bucket table");
        })
        .join();
    }
}

fn sweep_stale(buckets: &Mutex<BucketMap>, now: Instant) -> usize {
    let Ok(mut buckets) = buckets.lock() else {
        tracing::error!("Rate limiter lock poisoned, skipping sweep");
        return 0;
    };

    let before = buckets.len();
    buckets.retain(|_, bucket| now <= bucket.reset_time);
    before - buckets.len()
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn allow(&self, identifier: &str) -> Result<bool, AppError> {
        let mut buckets = self.buckets.lock().map_err(|_| {
            AppError::internal(
                "Rate limiter unavailable",
                json!({ "reason": "lock poisoned" }),
            )
        })?;

        let now = Instant::now();

        if let Some(bucket) = buckets
            .get_mut(identifier)
            .filter(|bucket| now <= bucket.reset_time)
        {
            if bucket.count >= self.limit {
                return Ok(false);
            }
            bucket.count += 1;
            return Ok(true);
        }

        // First request, or first request after the window elapsed.
        buckets.insert(
            identifier.to_owned(),
            Bucket {
                count: 1,
                reset_time: now + self.window,
            },
        );

        Ok(true)
    }

    fn retry_after(&self, identifier: &str) -> Option<Duration> {
        let buckets = self.buckets.lock().ok()?;
        let bucket = buckets.get(identifier)?;
        Some(bucket.reset_time.saturating_duration_since(Instant::now()))
    }

    fn is_available(&self) -> bool {
        !self.buckets.is_poisoned()
    }
}
