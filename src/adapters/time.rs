//! Monotonic clock adapter.
//!
//! Wraps [`std::time::Instant`] behind the [`Clock`] port so the speaker's
//! elapsed-time ramp can be driven by a stepped fake in tests and by real
//! time in the binaries.

use std::time::Instant;

use crate::app::ports::Clock;

/// Wall-clock-independent monotonic time source.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> i64 {
        self.start.elapsed().as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_and_non_negative() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(a >= 0);
        assert!(b >= a);
    }
}
