//! Fixed tick-rate scheduling
//!
//! The loop sleeps until [`FramePacer::deadline`], then asks how many ticks
//! are due. Falling behind by a few ticks is caught up; falling further behind
//! (window dragged, machine suspended) resynchronizes instead of replaying.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Duration,
    next: Instant,
    max_catchup: u32,
}

impl FramePacer {
    /// Start pacing at `rate` ticks per second; the first tick is due at `start`
    pub fn new(rate: u32, max_catchup: u32, start: Instant) -> Self {
        let rate = rate.max(1);
        Self {
            period: Duration::from_secs(1) / rate,
            next: start,
            max_catchup: max_catchup.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next tick is due
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Number of ticks to run now, advancing the deadline past them
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if now < self.next {
            return 0;
        }

        let behind = now.duration_since(self.next);
        let due = (behind.as_nanos() / self.period.as_nanos().max(1)) as u64 + 1;

        if due > self.max_catchup as u64 {
            log::debug!(
                "frame pacer {} ticks behind, resynchronizing",
                due - self.max_catchup as u64
            );
            self.next = now + self.period;
            return self.max_catchup;
        }

        self.next += self.period * due as u32;
        due as u32
    }
}
