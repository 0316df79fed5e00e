//! Fixed-period timers driven by the session clock.
//!
//! Nothing here sleeps or spawns threads: the owner polls with the current
//! session time and the ticker answers whether a period boundary was crossed.

use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Ticker {
    period: Duration,
    next_due: Duration,
}

impl Ticker {
    /// A ticker whose first boundary is one `period` after `start`.
    pub fn new(period: Duration, start: Duration) -> Self {
        Ticker {
            period,
            next_due: start + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Returns `true` once per crossed boundary.  A poll that arrives several
    /// periods late fires a single time and skips to the first boundary
    /// after `now`.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        if self.period.is_zero() {
            self.next_due = now;
            return true;
        }
        let behind = (now - self.next_due).as_nanos() / self.period.as_nanos();
        let skipped = u32::try_from(behind + 1).unwrap_or(u32::MAX);
        self.next_due += self.period * skipped;
        true
    }
}
