//! Monotonic time source and absolute-deadline pacing primitive.
//!
//! OS sleep primitives (`thread::sleep`) carry millisecond-scale jitter on
//! general-purpose schedulers. `wait_until` sleeps the coarse remainder of the
//! wait and busy-spins the last sliver, bounding phase error to a handful of
//! microseconds without pinning a core for the whole interval.

use std::thread;
use std::time::{Duration, Instant};

use crate::error::EmulatorResult;

/// Spin instead of sleeping once less than this remains before the deadline.
const SPIN_THRESHOLD_NS: u64 = 100_000;

pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> EmulatorResult<Self> {
        // `Instant::now()` cannot fail on supported platforms; the fallible
        // constructor keeps the taxonomy total and gives tests a seam to
        // simulate a dead time source.
        Ok(Clock {
            origin: Instant::now(),
        })
    }

    /// Nanoseconds elapsed since this clock was created.
    pub fn now_ns(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    /// Block until `now_ns() >= deadline_ns`, sleeping the coarse remainder
    /// and busy-spinning the final `SPIN_THRESHOLD_NS`.
    pub fn wait_until(&self, deadline_ns: u64) {
        loop {
            let now = self.now_ns();
            if now >= deadline_ns {
                return;
            }

            let remaining_ns = deadline_ns - now;
            if remaining_ns > SPIN_THRESHOLD_NS {
                thread::sleep(Duration::from_nanos(remaining_ns - SPIN_THRESHOLD_NS));
            } else {
                while self.now_ns() < deadline_ns {
                    std::hint::spin_loop();
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_ns_is_monotonic() {
        let clock = Clock::new().unwrap();
        let a = clock.now_ns();
        let b = clock.now_ns();
        assert!(b >= a);
    }

    #[test]
    fn wait_until_reaches_deadline() {
        let clock = Clock::new().unwrap();
        let deadline = clock.now_ns() + 2_000_000;
        clock.wait_until(deadline);
        assert!(clock.now_ns() >= deadline);
    }

    #[test]
    fn wait_until_past_deadline_returns_immediately() {
        let clock = Clock::new().unwrap();
        let deadline = clock.now_ns();
        clock.wait_until(deadline);
        assert!(clock.now_ns() >= deadline);
    }
}
