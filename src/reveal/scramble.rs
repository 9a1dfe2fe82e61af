//! Progress scramble - a left-to-right lock-in over a fixed duration.
//!
//! Unlike the flap sequencer there are no per-slot timers. One eased tween
//! runs from 0 to 1; at progress `p` the first `floor(p * n)` characters are
//! locked to the target and the rest are re-rolled every frame. Locked
//! characters never unlock within a run.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::alphabet::GlyphAlphabet;
use crate::effects::easing::power2_out;

/// Default run length for the mount trigger.
pub const MOUNT_DURATION: Duration = Duration::from_millis(900);

/// Default run length for the hover trigger.
pub const HOVER_DURATION: Duration = Duration::from_millis(400);

/// What starts a scramble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrambleTrigger {
    /// Once, after a delay from mount.
    Mount { delay: Duration },
    /// Every pointer enter that arrives while idle.
    Hover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Delayed { until: Duration },
    Running { since: Duration },
}

/// Scramble text effect.
#[derive(Debug, Clone)]
pub struct ScrambleReveal {
    target: Vec<char>,
    display: Vec<char>,
    locked: usize,
    duration: Duration,
    trigger: ScrambleTrigger,
    alphabet: GlyphAlphabet,
    rng: StdRng,
    phase: Phase,
    runs: u64,
    /// The mount run was started or torn down; it never plays again.
    mount_consumed: bool,
}

impl ScrambleReveal {
    /// Scramble once on mount, starting `delay` after [`start`](Self::start).
    pub fn on_mount(text: impl Into<String>, delay: Duration, duration: Duration) -> Self {
        Self::new(text.into(), duration, ScrambleTrigger::Mount { delay })
    }

    /// Scramble whenever hovered.
    pub fn on_hover(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text.into(), duration, ScrambleTrigger::Hover)
    }

    fn new(text: String, duration: Duration, trigger: ScrambleTrigger) -> Self {
        let target: Vec<char> = text.chars().collect();
        Self {
            display: target.clone(),
            target,
            locked: 0,
            duration,
            trigger,
            alphabet: GlyphAlphabet::scramble(),
            rng: StdRng::from_os_rng(),
            phase: Phase::Idle,
            runs: 0,
            mount_consumed: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_alphabet(mut self, alphabet: GlyphAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    /// Mount: show scrambled text now and begin locking in after the delay.
    /// Runs at most once. Hover effects ignore this.
    pub fn start(&mut self, now: Duration) {
        let ScrambleTrigger::Mount { delay } = self.trigger else {
            return;
        };
        if self.mount_consumed || self.target.is_empty() {
            return;
        }
        self.mount_consumed = true;
        self.scramble_from(0);
        self.phase = Phase::Delayed { until: now + delay };
    }

    /// Pointer entered. Ignored while a run is in flight.
    ///
    /// Returns true if a new run started.
    pub fn hover(&mut self, now: Duration) -> bool {
        if self.is_animating() || self.target.is_empty() {
            return false;
        }
        self.scramble_from(0);
        self.phase = Phase::Running { since: now };
        debug!(len = self.target.len(), "scramble started");
        true
    }

    /// Replace the text. Idle effects show it at once; a running scramble
    /// resolves to it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.target = text.into().chars().collect();
        self.locked = self.locked.min(self.target.len());
        if self.is_animating() {
            self.display.resize(self.target.len(), ' ');
            self.display[..self.locked].copy_from_slice(&self.target[..self.locked]);
        } else {
            self.display = self.target.clone();
        }
    }

    /// Stop and show the exact text. A cancelled mount run does not replay.
    pub fn cancel(&mut self) {
        self.mount_consumed = true;
        self.phase = Phase::Idle;
        self.display = self.target.clone();
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Step to `now`. Returns true if the display changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if let Phase::Delayed { until } = self.phase {
            if now < until {
                return false;
            }
            self.phase = Phase::Running { since: until };
        }
        let Phase::Running { since } = self.phase else {
            return false;
        };

        let raw = if self.duration.is_zero() {
            1.0
        } else {
            now.saturating_sub(since).as_secs_f32() / self.duration.as_secs_f32()
        };
        if raw >= 1.0 {
            self.display = self.target.clone();
            self.locked = self.target.len();
            self.phase = Phase::Idle;
            self.runs += 1;
            debug!(runs = self.runs, "scramble complete");
            return true;
        }

        let n = self.target.len();
        let locked = ((power2_out(raw) * n as f32).floor() as usize).min(n);
        self.scramble_from(self.locked.max(locked));
        true
    }

    /// Lock `locked` leading characters and re-roll the rest.
    fn scramble_from(&mut self, locked: usize) {
        self.locked = locked;
        let Self { target, display, alphabet, rng, .. } = self;
        display.clear();
        display.extend(target.iter().enumerate().map(|(i, &c)| {
            if i < locked || c == ' ' { c } else { alphabet.pick(rng) }
        }));
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn display(&self) -> String {
        self.display.iter().collect()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.display
    }

    pub fn text(&self) -> String {
        self.target.iter().collect()
    }

    /// Leading characters already locked in this run.
    pub fn locked(&self) -> usize {
        self.locked
    }

    /// True while delayed or running.
    pub fn is_animating(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Completed runs.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn trigger(&self) -> ScrambleTrigger {
        self.trigger
    }

    /// Delay until the next frame is needed.
    pub fn next_deadline(&self, now: Duration) -> Option<Duration> {
        match self.phase {
            Phase::Idle => None,
            Phase::Delayed { until } => Some(until.saturating_sub(now)),
            Phase::Running { .. } => Some(Duration::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_mount_shows_text_before_start() {
        let scramble = ScrambleReveal::on_mount("HELLO", ms(200), MOUNT_DURATION);
        assert_eq!(scramble.display(), "HELLO");
        assert!(!scramble.is_animating());
    }

    #[test]
    fn test_mount_scrambles_then_waits_for_delay() {
        let mut scramble = ScrambleReveal::on_mount("HELLO", ms(200), MOUNT_DURATION).with_seed(1);
        scramble.start(Duration::ZERO);

        assert!(scramble.is_animating());
        assert!(scramble.glyphs().iter().all(|c| !"HELO".contains(*c)));
        assert!(!scramble.advance(ms(199)));
        assert_eq!(scramble.next_deadline(ms(100)), Some(ms(100)));
        assert!(scramble.advance(ms(200)));
        assert_eq!(scramble.next_deadline(ms(200)), Some(Duration::ZERO));
    }

    #[test]
    fn test_prefix_locks_monotonically() {
        let mut scramble = ScrambleReveal::on_hover("EXPERIMENTS", ms(400)).with_seed(9);
        scramble.hover(Duration::ZERO);

        let mut last = 0;
        for t in (0..400).step_by(16) {
            scramble.advance(ms(t));
            let locked = scramble.locked();
            assert!(locked >= last);
            assert_eq!(&scramble.glyphs()[..locked], &"EXPERIMENTS".chars().collect::<Vec<_>>()[..locked]);
            last = locked;
        }
    }

    #[test]
    fn test_completes_with_exact_text() {
        let mut scramble = ScrambleReveal::on_mount("v.01 BUILD", Duration::ZERO, MOUNT_DURATION).with_seed(3);
        scramble.start(Duration::ZERO);
        scramble.advance(ms(10));
        scramble.advance(ms(900));

        assert_eq!(scramble.display(), "v.01 BUILD");
        assert!(!scramble.is_animating());
        assert_eq!(scramble.runs(), 1);
    }

    #[test]
    fn test_mount_runs_once() {
        let mut scramble = ScrambleReveal::on_mount("ONCE", Duration::ZERO, ms(100));
        scramble.start(Duration::ZERO);
        scramble.advance(ms(100));
        scramble.start(ms(200));
        assert!(!scramble.is_animating());
    }

    #[test]
    fn test_cancelled_mount_does_not_replay() {
        let mut scramble = ScrambleReveal::on_mount("ONCE", ms(50), ms(100));
        scramble.start(Duration::ZERO);
        scramble.advance(ms(80));
        scramble.cancel();
        assert_eq!(scramble.display(), "ONCE");

        scramble.start(ms(200));
        assert!(!scramble.is_animating());
        assert_eq!(scramble.runs(), 0);
        assert_eq!(scramble.display(), "ONCE");
    }

    #[test]
    fn test_hover_ignored_while_running() {
        let mut scramble = ScrambleReveal::on_hover("VIEW", HOVER_DURATION);
        assert!(scramble.hover(Duration::ZERO));
        assert!(!scramble.hover(ms(100)));
        scramble.advance(ms(400));
        assert!(scramble.hover(ms(500)));
    }

    #[test]
    fn test_spaces_stay_spaces() {
        let mut scramble = ScrambleReveal::on_hover("A B C", HOVER_DURATION).with_seed(4);
        scramble.hover(Duration::ZERO);
        let glyphs = scramble.glyphs();
        assert_eq!(glyphs[1], ' ');
        assert_eq!(glyphs[3], ' ');
    }

    #[test]
    fn test_set_text_idle_and_running() {
        let mut scramble = ScrambleReveal::on_hover("OLD", HOVER_DURATION);
        scramble.set_text("NEWER");
        assert_eq!(scramble.display(), "NEWER");

        scramble.hover(Duration::ZERO);
        scramble.set_text("NEW");
        assert_eq!(scramble.glyphs().len(), 3);
        scramble.advance(ms(400));
        assert_eq!(scramble.display(), "NEW");
    }

    #[test]
    fn test_empty_text_never_animates() {
        let mut scramble = ScrambleReveal::on_hover("", HOVER_DURATION);
        assert!(!scramble.hover(Duration::ZERO));
        assert_eq!(scramble.next_deadline(Duration::ZERO), None);
    }
}
