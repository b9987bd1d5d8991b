//! Fixed-window request counting per client identifier.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tokio::time::interval;
use tracing::{debug, info};

/// Counter for one client within its current window
#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

/// Outcome of a single rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub allowed: bool,
    /// Maximum requests per window
    pub limit: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Time until the current window resets
    pub reset_after: Duration,
    pub window: Duration,
}

/// In-memory fixed-window limiter keyed by client identifier.
///
/// Increment-and-compare for a key happens under a single lock, so concurrent
/// bursts from one client are never undercounted.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        RateLimiter {
            window,
            max_requests,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, RateLimitEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                debug!("Rate limiter lock poisoned, recovering...");
                poisoned.into_inner()
            }
        }
    }

    /// Counts one request for `key` and reports whether it is within quota.
    pub fn check(&self, key: &str) -> RateLimitStatus {
        self.check_at(key, Instant::now())
    }

    pub(crate) fn check_at(&self, key: &str, now: Instant) -> RateLimitStatus {
        let mut entries = self.lock_entries();
        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        if now.saturating_duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        entry.count = entry.count.saturating_add(1);

        let elapsed = now.saturating_duration_since(entry.window_start);
        RateLimitStatus {
            allowed: entry.count <= self.max_requests,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_after: self.window.saturating_sub(elapsed),
            window: self.window,
        }
    }

    /// Drops every key whose window has fully elapsed. Returns how many were removed.
    pub fn sweep_expired(&self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub(crate) fn sweep_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|_, e| now.saturating_duration_since(e.window_start) < self.window);
        before - entries.len()
    }

    /// Number of client keys currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.lock_entries().len()
    }

    /// Periodically evicts expired keys, once per window, for the life of the process.
    pub async fn run_sweeper(self: Arc<Self>) {
        let mut interval_timer = interval(self.window);
        info!(
            "Starting rate limit sweeper with {}s interval",
            self.window.as_secs()
        );

        loop {
            interval_timer.tick().await;
            let removed = self.sweep_expired();
            if removed > 0 {
                debug!(
                    "Evicted {} expired rate limit entries, {} clients still tracked",
                    removed,
                    self.tracked_clients()
                );
            }
        }
    }
}
