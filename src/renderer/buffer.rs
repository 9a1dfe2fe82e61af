//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is the grid every effect draws into. The diff renderer
//! turns it into escape codes.
//!
//! - **Flat storage**: `Vec<Cell>`, row-major, `index = y * width + x`.
//! - **Clipping**: drawing calls take an optional `ClipRect` (section bounds).
//! - **Alpha blending**: translucent backgrounds blend over what is already there.

use crate::types::{Attr, Cell, ClipRect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Create a buffer with a solid background.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        buffer.clear_with_bg(bg);
        buffer
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Characters of one row as a string. Empty if out of range.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        self.cells[start..start + self.width as usize]
            .iter()
            .filter_map(|cell| char::from_u32(cell.char))
            .collect()
    }

    /// Reset every cell to the terminal default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reset every cell to a blank on `bg`.
    pub fn clear_with_bg(&mut self, bg: Rgba) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell. Returns true if the cell was inside bounds and clip.
    #[allow(clippy::too_many_arguments)]
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        char: u32,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.bg = if bg.is_opaque() || bg.is_terminal_default() {
            bg
        } else {
            Rgba::blend(bg, cell.bg)
        };
        cell.char = char;
        cell.fg = fg;
        cell.attrs = attrs;
        true
    }

    /// Blend a color over a cell's background, keeping its glyph.
    pub fn tint(&mut self, x: u16, y: u16, color: Rgba) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.bg = Rgba::blend(color, cell.bg);
        }
    }

    /// Fill a rectangle with blanks on `bg`.
    pub fn fill_rect(&mut self, rect: ClipRect, bg: Rgba, clip: Option<&ClipRect>) {
        let area = match clip {
            Some(clip) => rect.intersect(clip),
            None => Some(rect),
        };
        let Some(area) = area.and_then(|r| r.intersect(&self.bounds())) else {
            return;
        };

        let opaque = bg.is_opaque() || bg.is_terminal_default();
        for row in area.y..area.y + area.height {
            let start = self.index(area.x, row);
            let end = start + area.width as usize;
            for cell in &mut self.cells[start..end] {
                cell.bg = if opaque { bg } else { Rgba::blend(bg, cell.bg) };
                cell.char = b' ' as u32;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw a single character. `None` background keeps the existing one.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        let bg = match bg {
            Some(bg) => bg,
            None => match self.get(x, y) {
                Some(cell) => cell.bg,
                None => return false,
            },
        };
        self.set_cell(x, y, ch as u32, fg, bg, attrs, clip)
    }

    /// Draw text at a position. Returns the number of columns advanced.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            if char_width(ch) == 0 {
                continue;
            }
            self.draw_char(col, y, ch, fg, bg, attrs, clip);
            col += 1;
        }
        col - x
    }

    /// Draw text centered within `width` columns starting at `x`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let text_width = string_width(text);
        let offset = (width as usize).saturating_sub(text_width) / 2;
        self.draw_text(x + offset as u16, y, text, fg, bg, attrs, clip)
    }

    /// Horizontal rule.
    pub fn draw_hline(&mut self, x: u16, y: u16, width: u16, ch: char, fg: Rgba, clip: Option<&ClipRect>) {
        for col in x..x.saturating_add(width) {
            self.draw_char(col, y, ch, fg, None, Attr::NONE, clip);
        }
    }
}

// =============================================================================
// Character width
// =============================================================================

/// Display width of a character. Control characters take no space; every
/// other character drawn here is treated as a single column.
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if cp < 32 || (0x7F..=0x9F).contains(&cp) { 0 } else { 1 }
}

/// Display width of a string.
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// =============================================================================
// Tests
// =============================================================================
