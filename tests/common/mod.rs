#![allow(dead_code)]

use async_trait::async_trait;
use shortlink::domain::repositories::{CodeGenerator, RateLimiter};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::infrastructure::rate_limit::MemoryRateLimiter;
use shortlink::state::AppState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "http://s.test";

/// State with no link expiry and no rate limiting.
pub fn create_test_state() -> AppState {
    create_test_state_with(Duration::ZERO, None, false)
}

pub fn create_test_state_with(
    ttl: Duration,
    rate_limiter: Option<Arc<dyn RateLimiter>>,
    behind_proxy: bool,
) -> AppState {
    let link_repository = Arc::new(MemoryLinkRepository::new(ttl));
    AppState::new(link_repository, rate_limiter, BASE_URL, behind_proxy)
}

pub fn limiter(limit: u32, window: Duration) -> Arc<dyn RateLimiter> {
    Arc::new(MemoryRateLimiter::new(limit, window))
}

/// Generator replaying a fixed list of codes, repeating the last one forever.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    calls: Mutex<usize>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new(String::new()),
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self) -> String {
        *self.calls.lock().unwrap() += 1;

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.codes.lock().unwrap().pop_front() {
            *last = next;
        }
        last.clone()
    }
}

/// Limiter whose backing state is always unavailable.
pub struct FailingLimiter;

#[async_trait]
impl RateLimiter for FailingLimiter {
    async fn allow(&self, _identifier: &str) -> Result<bool, AppError> {
        Err(AppError::internal(
            "Rate limiter unavailable",
            serde_json::json!({}),
        ))
    }
}
