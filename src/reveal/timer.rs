//! Scheduled task - a start delay followed by a repeating interval.
//!
//! One task per slot. Time is injected as `Duration` since the clock origin,
//! so the same task runs under a real frame clock or a manual test clock.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use flapboard::reveal::ScheduledTask;
//!
//! let ms = Duration::from_millis;
//! let mut task = ScheduledTask::new(ms(0), ms(100), ms(50));
//!
//! assert_eq!(task.pop_due(ms(149)), None);
//! assert_eq!(task.pop_due(ms(150)), Some(ms(150)));
//!
//! task.cancel();
//! assert_eq!(task.pop_due(ms(1_000)), None);
//! ```

use std::time::Duration;

/// Floor for the repeat interval; a zero interval would fire forever.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// A cancellable delayed, repeating task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    start: Duration,
    interval: Duration,
    next_due: Duration,
    cancelled: bool,
}

impl ScheduledTask {
    /// Schedule a task at `now + delay`; the first tick fires one interval later.
    pub fn new(now: Duration, delay: Duration, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        let start = now + delay;
        Self {
            start,
            interval,
            next_due: start + interval,
            cancelled: false,
        }
    }

    /// When the delay elapses and ticking begins.
    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time of the next tick, or `None` once cancelled.
    pub fn next_due(&self) -> Option<Duration> {
        if self.cancelled {
            None
        } else {
            Some(self.next_due)
        }
    }

    /// Check whether the start delay has elapsed.
    pub fn has_started(&self, now: Duration) -> bool {
        !self.cancelled && now >= self.start
    }

    /// Take the earliest tick due at or before `now`.
    ///
    /// Returns the scheduled time of that tick. Call repeatedly to drain
    /// ticks that piled up while the caller was late.
    pub fn pop_due(&mut self, now: Duration) -> Option<Duration> {
        if self.cancelled || self.next_due > now {
            return None;
        }
        let due = self.next_due;
        self.next_due += self.interval;
        Some(due)
    }

    /// Cancel the task. Returns true if this call did the cancelling.
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.cancelled;
        self.cancelled = true;
        was_active
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_first_tick_one_interval_after_start() {
        let task = ScheduledTask::new(ms(10), ms(100), ms(50));
        assert_eq!(task.start(), ms(110));
        assert_eq!(task.next_due(), Some(ms(160)));
        assert!(!task.has_started(ms(109)));
        assert!(task.has_started(ms(110)));
    }

    #[test]
    fn test_pop_due_drains_backlog_in_order() {
        let mut task = ScheduledTask::new(ms(0), ms(0), ms(50));
        let ticks: Vec<Duration> = std::iter::from_fn(|| task.pop_due(ms(175))).collect();
        assert_eq!(ticks, vec![ms(50), ms(100), ms(150)]);
        assert_eq!(task.next_due(), Some(ms(200)));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut task = ScheduledTask::new(ms(0), ms(0), ms(50));
        assert!(task.cancel());
        assert!(!task.cancel());
        assert!(task.is_cancelled());
        assert_eq!(task.next_due(), None);
        assert_eq!(task.pop_due(ms(10_000)), None);
        assert!(!task.has_started(ms(10_000)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut task = ScheduledTask::new(ms(0), ms(0), Duration::ZERO);
        assert_eq!(task.interval(), MIN_INTERVAL);
        let count = std::iter::from_fn(|| task.pop_due(ms(5))).count();
        assert_eq!(count, 5);
    }
}
