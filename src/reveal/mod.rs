//! Character reveal effects.
//!
//! - [`RevealSequencer`] - per-slot split-flap and ticker reveals
//! - [`ScrambleReveal`] - eased left-to-right scramble
//!
//! Both are driven by an injected `now` and never read a clock themselves.

mod alphabet;
mod config;
mod scramble;
mod sequencer;
mod slot;
mod timer;

pub use alphabet::GlyphAlphabet;
pub use config::{FlipPolicy, PassTiming, Placeholder, RevealConfig, SettleRule, TargetCase};
pub use scramble::{HOVER_DURATION, MOUNT_DURATION, ScrambleReveal, ScrambleTrigger};
pub use sequencer::{
    CompleteHandler, PassKind, PassState, RevealSequencer, SettleEvent, SettleHandler,
};
pub use slot::{CharacterSlot, RevealSnapshot, SlotPhase, SlotSnapshot};
pub use timer::ScheduledTask;
