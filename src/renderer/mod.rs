//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. Effects and widgets fill a
//! [`FrameBuffer`]; [`DiffRenderer`] turns it into the minimal set of escape
//! codes for a fullscreen terminal.

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod output;

pub use crate::types::ClipRect;
pub use buffer::{FrameBuffer, char_width, string_width};
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
