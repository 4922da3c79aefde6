//! Time sources for the session driver.
//!
//! The generator never reads the wall clock itself; every time-dependent
//! operation takes `now` in epoch milliseconds. A [`Clock`] supplies that
//! value to [`crate::session::FeedSession`].

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Wall-clock time via `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock. Clones share the same instant, so a test can keep
/// a handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Move forward by `delta_ms`. Negative deltas are ignored.
    pub fn advance(&self, delta_ms: i64) {
        if delta_ms > 0 {
            self.now.fetch_add(delta_ms, Ordering::SeqCst);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
