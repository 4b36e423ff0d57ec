//! Wall-clock abstraction.
//!
//! Task creation stamps `created_at` from a `Clock`, so tests can pin time
//! with `FixedClock` instead of sleeping or comparing ranges.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// One day in epoch milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Source of the current time in Unix epoch milliseconds.
pub trait Clock {
    fn now_epoch_ms(&self) -> i64;
}

/// Reads the operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // A clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Manually driven clock for deterministic tests.
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    now: Cell<i64>,
}

impl FixedClock {
    pub fn new(now_epoch_ms: i64) -> Self {
        Self {
            now: Cell::new(now_epoch_ms),
        }
    }

    pub fn set(&self, now_epoch_ms: i64) {
        self.now.set(now_epoch_ms);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get().saturating_add(delta_ms));
    }
}

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_epoch_ms(&self) -> i64 {
        (**self).now_epoch_ms()
    }
}
