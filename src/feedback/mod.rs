//! Click feedback - the optional side channel fired as slots flip and settle.
//!
//! The sequencer never depends on feedback working. It receives an
//! `Option<Arc<dyn ClickFeedback>>` and drops every error it gets back.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use flapboard::feedback::{ClickEngine, ClickFeedback, TerminalClick};
//!
//! // Engine that writes into memory instead of the terminal.
//! let engine = Arc::new(ClickEngine::with_writer(Vec::new()));
//! let click = TerminalClick::with_engine(engine.clone());
//!
//! // Engines start muted.
//! assert!(click.play_click().is_err());
//!
//! engine.set_muted(false);
//! assert!(click.play_click().is_ok());
//! assert_eq!(engine.clicks_played(), 1);
//! ```

mod audio;
mod tone;

use std::io;
use std::time::Duration;

use thiserror::Error;

pub use audio::{ClickEngine, TerminalClick, click_engine};
pub use tone::ClickTone;

/// Why a click could not be delivered.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback is muted")]
    Muted,
    #[error("{0} is not supported by this output")]
    Unsupported(&'static str),
    #[error("feedback output is unavailable")]
    Unavailable,
    #[error("feedback output failed: {0}")]
    Io(#[from] io::Error),
}

/// Something that can make an audible (or tactile) tick.
pub trait ClickFeedback: Send + Sync {
    /// Play one click.
    fn play_click(&self) -> Result<(), FeedbackError>;

    /// Short vibration. Most outputs have no motor.
    fn vibrate(&self, _duration: Duration) -> Result<(), FeedbackError> {
        Err(FeedbackError::Unsupported("vibration"))
    }
}
