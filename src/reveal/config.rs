//! Reveal configuration - timing, settle policy and presentation presets.
//!
//! Follows the props pattern: a plain struct with `Default`, named presets,
//! and `with_*` setters for the fields callers usually tweak.
//!
//! ```
//! use std::time::Duration;
//! use flapboard::reveal::{FlipPolicy, RevealConfig};
//!
//! let config = RevealConfig::split_flap()
//!     .with_tick_interval(Duration::from_millis(80))
//!     .with_seed(42);
//!
//! assert_eq!(config.policy, FlipPolicy::Fixed { base: 8, per_index: 3 });
//! ```

use std::time::Duration;

use rand::Rng;

use super::alphabet::GlyphAlphabet;

// =============================================================================
// FLIP POLICY
// =============================================================================

/// How many placeholder flips a slot shows before settling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlipPolicy {
    /// `base + index * per_index` flips. Settle order follows slot order.
    Fixed { base: u32, per_index: u32 },
    /// A fresh count from `[min, max)` per slot per pass.
    Randomized { min: u32, max: u32 },
}

impl FlipPolicy {
    /// Threshold for the slot at `index`.
    pub fn threshold<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> u32 {
        match *self {
            FlipPolicy::Fixed { base, per_index } => {
                let index = u32::try_from(index).unwrap_or(u32::MAX);
                base.saturating_add(index.saturating_mul(per_index))
            }
            FlipPolicy::Randomized { min, max } => {
                if max <= min {
                    min
                } else {
                    rng.random_range(min..max)
                }
            }
        }
    }

    /// True when settle times are guaranteed non-decreasing in slot index.
    pub fn is_ordered(&self) -> bool {
        matches!(self, FlipPolicy::Fixed { .. })
    }
}

impl Default for FlipPolicy {
    fn default() -> Self {
        FlipPolicy::Fixed { base: 8, per_index: 3 }
    }
}

/// When a slot's flip counter is compared with its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettleRule {
    /// Check, then flip: `threshold` glyphs, settles on tick `threshold + 1`.
    #[default]
    CheckThenFlip,
    /// Count the tick first: `threshold - 1` glyphs, settles on tick `threshold`.
    CountThenCheck,
}

// =============================================================================
// PRESENTATION
// =============================================================================

/// What an unsettled slot shows before its first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// A random glyph from the alphabet (split-flap).
    #[default]
    Random,
    /// Nothing until the slot starts flipping (ticker).
    Blank,
}

/// How source characters map to slot targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetCase {
    /// Keep characters as given.
    #[default]
    Preserve,
    /// Uppercase, and show characters the alphabet cannot print as blanks.
    BoardUpper,
}

/// Timing base for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTiming {
    /// Fixed delay before slot 0 starts.
    pub base_delay: Duration,
    /// Additional delay per slot index.
    pub stagger: Duration,
}

impl PassTiming {
    pub const fn new(base_delay: Duration, stagger: Duration) -> Self {
        Self { base_delay, stagger }
    }

    /// `base_delay + index * stagger`.
    pub fn start_offset(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay + self.stagger.saturating_mul(index)
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Full configuration for a [`RevealSequencer`](super::RevealSequencer).
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Time between flips once a slot is ticking.
    pub tick_interval: Duration,
    /// Timing for the first pass.
    pub entrance: PassTiming,
    /// Timing for hover re-triggers.
    pub retrigger: PassTiming,
    /// Re-triggers within this window of the first pass still use entrance timing.
    pub entrance_guard: Duration,
    pub policy: FlipPolicy,
    pub settle: SettleRule,
    pub alphabet: GlyphAlphabet,
    pub placeholder: Placeholder,
    pub case: TargetCase,
    /// Click when a slot settles.
    pub click_on_settle: bool,
    /// Click on every n-th placeholder flip (0 disables).
    pub click_every_nth_flip: u32,
    /// Seed for deterministic runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl RevealConfig {
    /// Airport board: 50ms flips, 120ms stagger (60ms on hover), `8 + 3i` flips,
    /// clicks on settle and every other flip.
    pub fn split_flap() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            entrance: PassTiming::new(Duration::ZERO, Duration::from_millis(120)),
            retrigger: PassTiming::new(Duration::ZERO, Duration::from_millis(60)),
            entrance_guard: Duration::from_secs(1),
            policy: FlipPolicy::Fixed { base: 8, per_index: 3 },
            settle: SettleRule::CheckThenFlip,
            alphabet: GlyphAlphabet::flap(),
            placeholder: Placeholder::Random,
            case: TargetCase::BoardUpper,
            click_on_settle: true,
            click_every_nth_flip: 2,
            seed: None,
        }
    }

    /// Ticker headline: 80ms flips and stagger, 500ms entrance delay,
    /// `[8, 14)` random ticks counted before the check, silent.
    pub fn ticker() -> Self {
        Self {
            tick_interval: Duration::from_millis(80),
            entrance: PassTiming::new(Duration::from_millis(500), Duration::from_millis(80)),
            retrigger: PassTiming::new(Duration::ZERO, Duration::from_millis(80)),
            entrance_guard: Duration::ZERO,
            policy: FlipPolicy::Randomized { min: 8, max: 14 },
            settle: SettleRule::CountThenCheck,
            alphabet: GlyphAlphabet::ticker(),
            placeholder: Placeholder::Blank,
            case: TargetCase::Preserve,
            click_on_settle: false,
            click_every_nth_flip: 0,
            seed: None,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the per-slot stagger for both entrance and re-trigger passes.
    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.entrance.stagger = stagger;
        self.retrigger.stagger = stagger;
        self
    }

    pub fn with_entrance(mut self, timing: PassTiming) -> Self {
        self.entrance = timing;
        self
    }

    pub fn with_retrigger(mut self, timing: PassTiming) -> Self {
        self.retrigger = timing;
        self
    }

    pub fn with_entrance_guard(mut self, guard: Duration) -> Self {
        self.entrance_guard = guard;
        self
    }

    pub fn with_policy(mut self, policy: FlipPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_settle_rule(mut self, settle: SettleRule) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_alphabet(mut self, alphabet: GlyphAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Turn off all click side effects.
    pub fn silent(mut self) -> Self {
        self.click_on_settle = false;
        self.click_every_nth_flip = 0;
        self
    }

    /// Map a source character to what the slot settles on.
    pub fn target_for(&self, c: char) -> char {
        match self.case {
            TargetCase::Preserve => c,
            TargetCase::BoardUpper => {
                if c == ' ' {
                    return ' ';
                }
                let upper = c.to_uppercase().next().unwrap_or(c);
                if self.alphabet.contains(upper) { upper } else { ' ' }
            }
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::split_flap()
    }
}
