//! Clock that advances by a fixed step on every read.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::ports::clock::Clock;

/// Deterministic clock: each call to `now` returns the next tick.
///
/// Folders created one after another in the in-memory tree therefore get
/// strictly increasing creation times.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    /// Creates a clock starting at `start` and advancing by `step`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self { next: Mutex::new(start), step }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
        Self::new(start, Duration::seconds(1))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().expect("clock lock poisoned");
        let now = *next;
        *next = now + self.step;
        now
    }
}
