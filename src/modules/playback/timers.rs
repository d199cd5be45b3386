use std::time::{Duration, Instant};

/// A periodic timer driven by the caller's clock.
///
/// Nothing runs in the background: the owner calls [`IntervalTimer::poll`]
/// from its tick and the timer reports whether a period elapsed. Dropping the
/// timer cancels it, so holding it in an `Option` scopes it to the state that
/// started it.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Instant,
}

impl IntervalTimer {
    /// Start a timer whose first fire is one period after `now`
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Returns true when a period elapsed since the last fire.
    ///
    /// Missed periods collapse into a single fire; the next one is scheduled
    /// a full period after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now >= self.next_due {
            self.next_due = now + self.period;
            true
        } else {
            false
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// A one-shot deadline.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(timeout: Duration, now: Instant) -> Self {
        Self { at: now + timeout }
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.at
    }
}
