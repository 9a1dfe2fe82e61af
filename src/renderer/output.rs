//! Output buffering and stateful cell rendering.
//!
//! A frame is accumulated in memory and written with one syscall. The cell
//! renderer remembers cursor, colors and attributes so each change is only
//! emitted once.

use std::io::{self, Write};

use crate::types::{Attr, Cell, Rgba};

use super::ansi;

// =============================================================================
// OutputBuffer
// =============================================================================

/// Accumulates escape codes and glyphs for a batch write.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    /// Write a codepoint. Invalid codepoints are dropped.
    #[inline]
    pub fn write_codepoint(&mut self, cp: u32) {
        if let Some(c) = char::from_u32(cp) {
            self.write_char(c);
        }
    }

    /// Write everything to `writer` and clear.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Accumulated output as text (lossy).
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Renders cells while tracking terminal state to minimize output.
///
/// Tracks the last cursor position, colors and attributes. A cell directly
/// right of the previous one skips the cursor move; unchanged colors skip
/// their SGR codes.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget all tracked state. Call at the start of each frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Render one cell, emitting only what changed.
    pub fn render_cell(&mut self, output: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            ansi::cursor_to(output, x, y)?;
        }

        if cell.attrs != self.last_attrs {
            ansi::reset(output)?;
            ansi::attrs(output, cell.attrs)?;
            // Reset cleared the colors too.
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(output, cell.fg)?;
            self.last_fg = Some(cell.fg);
        }

        if self.last_bg != Some(cell.bg) {
            ansi::bg(output, cell.bg)?;
            self.last_bg = Some(cell.bg);
        }

        output.write_codepoint(cell.char);

        self.last_x = x as i32;
        self.last_y = y as i32;
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
