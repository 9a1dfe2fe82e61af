//! State Module - runtime input and timing.
//!
//! - **Clock** - frame clocks that feed `now` to every effect
//! - **Keyboard** - key event types
//! - **Mouse** - HitGrid and hover tracking
//! - **Input** - crossterm conversion and polling

pub mod clock;
pub mod input;
pub mod keyboard;
pub mod mouse;

pub use clock::{FrameClock, ManualClock, MonotonicClock};
pub use input::{InputEvent, poll_event};
pub use keyboard::{KeyState, KeyboardEvent, Modifiers};
pub use mouse::{HitGrid, HoverChange, HoverTracker, MouseAction, MouseButton, MouseEvent, ScrollDirection};
