//! Pipeline - from effects to terminal.
//!
//! ```text
//! event loop: input → Page::advance(now) → generation += 1
//! render effect: generation, terminal size → Page::compose → HitGrid + DiffRenderer
//! ```
//!
//! - **page** - sections of effects, layout, scrolling, composition
//! - **terminal** - terminal size signals
//! - **mount** - terminal lifecycle, the render effect and the event loop
//!
//! Only the render effect touches the terminal and the hit grid. Composition
//! itself is pure, so pages can be tested without a terminal.

pub mod mount;
pub mod page;
pub mod terminal;

pub use mount::{Command, MountHandle, MountOptions, command_for, mount, run, tick};
pub use page::{Frame, HitRegion, Line, Page, Section, SectionEffect};
pub use terminal::{set_terminal_size, terminal_height, terminal_width};
