//! System clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads the system clock. Stamps journals and entries created during a dry run.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
