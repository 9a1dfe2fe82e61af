//! Terminal state signals.
//!
//! Width and height are the root signals of the render effect: a resize
//! sets them and the next frame is composed at the new size.

use std::cell::RefCell;
use std::io;

use spark_signals::{Signal, signal};

thread_local! {
    static TERMINAL_WIDTH: RefCell<Signal<u16>> = RefCell::new(signal(80));
    static TERMINAL_HEIGHT: RefCell<Signal<u16>> = RefCell::new(signal(24));
}

pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.borrow().get())
}

pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.borrow().get())
}

/// Set the terminal size (called on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| w.borrow().set(width));
    TERMINAL_HEIGHT.with(|h| h.borrow().set(height));
}

/// Width signal for reactive tracking.
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.borrow().clone())
}

/// Height signal for reactive tracking.
pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|h| h.borrow().clone())
}

/// Query crossterm for the real size and store it.
pub fn detect_terminal_size() -> (u16, u16) {
    if let Ok((width, height)) = crossterm::terminal::size() {
        set_terminal_size(width, height);
    }
    (terminal_width(), terminal_height())
}

/// Raw mode on or off. Failures while leaving are ignored by callers.
pub fn set_raw_mode(enabled: bool) -> io::Result<()> {
    if enabled {
        crossterm::terminal::enable_raw_mode()
    } else {
        crossterm::terminal::disable_raw_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
        assert_eq!(terminal_width_signal().get(), 120);
        assert_eq!(terminal_height_signal().get(), 40);
    }
}
