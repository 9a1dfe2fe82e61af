//! Escape sequences, queued through crossterm commands.
//!
//! Everything writes into any `Write` (normally an [`OutputBuffer`]) and is
//! flushed by the caller in one go.
//!
//! [`OutputBuffer`]: super::OutputBuffer

use std::io::{self, Write};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, queue};

use crate::types::{Attr, Rgba};

// =============================================================================
// Frame
// =============================================================================

pub fn begin_sync<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, BeginSynchronizedUpdate)
}

pub fn end_sync<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, EndSynchronizedUpdate)
}

pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> io::Result<()> {
    queue!(w, cursor::MoveTo(x, y))
}

pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, cursor::Hide)
}

pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, cursor::Show)
}

pub fn clear_screen<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, Clear(ClearType::All))
}

// =============================================================================
// Modes
// =============================================================================

pub fn enter_alt_screen<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, EnterAlternateScreen)
}

pub fn exit_alt_screen<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, LeaveAlternateScreen)
}

pub fn enable_mouse<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, EnableMouseCapture)
}

pub fn disable_mouse<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, DisableMouseCapture)
}

// =============================================================================
// Style
// =============================================================================

/// Reset all attributes and colors.
pub fn reset<W: Write>(w: &mut W) -> io::Result<()> {
    queue!(w, SetAttribute(Attribute::Reset))
}

/// Apply text attributes. Does not clear ones already set.
pub fn attrs<W: Write>(w: &mut W, attrs: Attr) -> io::Result<()> {
    const MAP: [(Attr, Attribute); 5] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::INVERSE, Attribute::Reverse),
    ];
    for (flag, attribute) in MAP {
        if attrs.contains(flag) {
            queue!(w, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

pub fn fg<W: Write>(w: &mut W, color: Rgba) -> io::Result<()> {
    queue!(w, SetForegroundColor(to_color(color)))
}

pub fn bg<W: Write>(w: &mut W, color: Rgba) -> io::Result<()> {
    queue!(w, SetBackgroundColor(to_color(color)))
}

/// Map to a crossterm color. Terminal default becomes `Reset`.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        return Color::Reset;
    }
    let channel = |v: i16| v.clamp(0, 255) as u8;
    Color::Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}
