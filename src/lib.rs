//! # flapboard
//!
//! Split-flap boards, ticker headlines and scramble reveals for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! render effect and [taffy](https://github.com/DioxusLabs/taffy) for layout.
//!
//! ## Architecture
//!
//! Every effect is a plain value stepped with an injected time (`now:
//! Duration`), so animations are deterministic under a
//! [`ManualClock`](state::ManualClock) and share one cooperative loop in a
//! terminal:
//!
//! ```text
//! RevealSequencer / ScrambleReveal / HighlightSweep / NoiseField
//!        ↓ advance(now)
//! Page (sections, taffy layout, scroll) → compose → FrameBuffer + hit regions
//!        ↓ render effect
//! DiffRenderer → terminal
//! ```
//!
//! ## Modules
//!
//! - [`reveal`] - the character reveal sequencer, its slots, timers and config
//! - [`effects`] - highlight sweep, noise grain, easing curves
//! - [`feedback`] - click feedback capability and the process-wide click engine
//! - [`widgets`] - drawing effects into a frame buffer
//! - [`renderer`] - frame buffer and differential ANSI renderer
//! - [`layout`] - taffy column layout
//! - [`pipeline`] - page composition, mount and event loop
//! - [`state`] - clocks, keyboard, mouse and input conversion
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use flapboard::reveal::{RevealConfig, RevealSequencer};
//!
//! let mut board = RevealSequencer::new("DEPARTURES", RevealConfig::split_flap().silent());
//! board.start(Duration::ZERO);
//! board.advance(Duration::from_secs(10));
//! assert_eq!(board.snapshot().text(), "DEPARTURES");
//! ```

pub mod effects;
pub mod error;
pub mod feedback;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod reveal;
pub mod state;
pub mod types;
pub mod widgets;

pub use error::{Error, Result};
pub use types::{Attr, Cell, ClipRect, Rgba};

pub use effects::{HighlightSweep, NoiseField};
pub use feedback::{ClickEngine, ClickFeedback, FeedbackError, TerminalClick, click_engine};
pub use pipeline::{MountHandle, MountOptions, Page, Section, mount};
pub use renderer::{DiffRenderer, FrameBuffer};
pub use reveal::{
    FlipPolicy, GlyphAlphabet, PassTiming, RevealConfig, RevealSequencer, RevealSnapshot,
    ScrambleReveal,
};
pub use state::{FrameClock, ManualClock, MonotonicClock};
pub use widgets::FlapStyle;
