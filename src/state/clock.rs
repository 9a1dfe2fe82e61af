//! Frame clocks.
//!
//! Everything animated takes `now` as a `Duration` since an origin. The
//! terminal loop reads a [`MonotonicClock`]; tests drive a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current animation time.
pub trait FrameClock {
    /// Time since the clock's origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start counting from now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    /// Move forward by `step` and return the new time.
    pub fn advance(&self, step: Duration) -> Duration {
        let now = self.now.get() + step;
        self.now.set(now);
        now
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(Duration::from_millis(40));
        clock.advance(Duration::from_millis(10));
        assert_eq!(view.now(), Duration::from_millis(50));

        view.set(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(2));
    }

    #[test]
    fn test_monotonic_clock_moves_forward() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
