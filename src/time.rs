//! Wall-clock port.
//!
//! Components ask a [`TimeSource`] for local civil time instead of reading
//! the system clock directly, so tests can pin "now".

use std::cell::Cell;

use chrono::NaiveDateTime;

pub trait TimeSource {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Host local time via `chrono::Local`. On `wasm32` chrono reads the
/// browser's `Date`, so this follows the visitor's timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Settable clock for tests and previews.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
