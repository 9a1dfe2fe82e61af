//! Widgets - draw effect state into a frame buffer.
//!
//! Widgets are pure: they read a snapshot or an effect and paint cells. They
//! return the rectangle they covered so the page can register hit regions.

use crate::effects::HighlightSweep;
use crate::renderer::FrameBuffer;
use crate::reveal::{RevealSnapshot, ScrambleReveal, SlotPhase, SlotSnapshot};
use crate::types::{Attr, ClipRect, Rgba};

// =============================================================================
// Split-flap
// =============================================================================

/// Look of a split-flap board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlapStyle {
    /// Columns per tile, glyph centered.
    pub tile_width: u16,
    /// Rows per tile, glyph on the middle row.
    pub tile_height: u16,
    /// Columns between tiles.
    pub gap: u16,
    /// Columns a space takes (no tile is drawn).
    pub space_width: u16,
    pub settled_fg: Rgba,
    pub settled_bg: Rgba,
    pub flipping_fg: Rgba,
    pub flipping_bg: Rgba,
    pub attrs: Attr,
}

impl Default for FlapStyle {
    fn default() -> Self {
        Self {
            tile_width: 3,
            tile_height: 1,
            gap: 1,
            space_width: 1,
            settled_fg: Rgba::WHITE,
            settled_bg: Rgba::BLACK,
            flipping_fg: Rgba::ACCENT,
            // 20% accent
            flipping_bg: Rgba::ACCENT.with_alpha(51),
            attrs: Attr::BOLD,
        }
    }
}

impl FlapStyle {
    /// Tall tiles for headline boards.
    pub fn hero() -> Self {
        Self {
            tile_height: 3,
            ..Self::default()
        }
    }

    fn slot_width(&self, slot: &SlotSnapshot) -> u16 {
        if slot.space { self.space_width } else { self.tile_width }
    }

    /// Size of a board for these slots.
    pub fn measure(&self, slots: &[SlotSnapshot]) -> (u16, u16) {
        if slots.is_empty() {
            return (0, 0);
        }
        let tiles: u16 = slots.iter().map(|s| self.slot_width(s)).sum();
        let gaps = self.gap.saturating_mul(slots.len() as u16 - 1);
        (tiles.saturating_add(gaps), self.tile_height)
    }
}

/// Draw a split-flap board with its top-left corner at `(x, y)`.
pub fn draw_flap(
    buffer: &mut FrameBuffer,
    x: u16,
    y: u16,
    snapshot: &RevealSnapshot,
    style: &FlapStyle,
    clip: Option<&ClipRect>,
) -> ClipRect {
    let (width, height) = style.measure(&snapshot.slots);
    let glyph_row = y + style.tile_height / 2;

    let mut col = x;
    for slot in &snapshot.slots {
        let slot_width = style.slot_width(slot);
        if !slot.space {
            let (fg, bg) = if slot.is_settled() {
                (style.settled_fg, style.settled_bg)
            } else {
                (style.flipping_fg, style.flipping_bg)
            };
            let tile = ClipRect::new(col, y, slot_width, style.tile_height);
            buffer.fill_rect(tile, bg, clip);
            buffer.draw_char(col + slot_width / 2, glyph_row, slot.glyph, fg, None, style.attrs, clip);
        }
        col = col.saturating_add(slot_width).saturating_add(style.gap);
    }

    ClipRect::new(x, y, width, height)
}

// =============================================================================
// Ticker
// =============================================================================

/// Draw a ticker headline: invisible until a letter starts flipping, accent
/// while flipping, black on accent once settled.
pub fn draw_ticker(
    buffer: &mut FrameBuffer,
    x: u16,
    y: u16,
    snapshot: &RevealSnapshot,
    clip: Option<&ClipRect>,
) -> ClipRect {
    for (i, slot) in snapshot.slots.iter().enumerate() {
        let col = x.saturating_add(i as u16);
        match slot.phase {
            SlotPhase::Waiting => {}
            SlotPhase::Flipping => {
                buffer.draw_char(col, y, slot.glyph, Rgba::ACCENT, None, Attr::BOLD, clip);
            }
            SlotPhase::Settled if !slot.space => {
                buffer.draw_char(col, y, slot.glyph, Rgba::BLACK, Some(Rgba::ACCENT), Attr::BOLD, clip);
            }
            SlotPhase::Settled => {}
        }
    }
    ClipRect::new(x, y, snapshot.slots.len() as u16, 1)
}

// =============================================================================
// Scramble
// =============================================================================

/// Draw scramble text in `fg`. Unlocked glyphs are dimmed.
pub fn draw_scramble(
    buffer: &mut FrameBuffer,
    x: u16,
    y: u16,
    scramble: &ScrambleReveal,
    fg: Rgba,
    clip: Option<&ClipRect>,
) -> ClipRect {
    let locked = if scramble.is_animating() { scramble.locked() } else { usize::MAX };
    let glyphs = scramble.glyphs();
    for (i, &ch) in glyphs.iter().enumerate() {
        let attrs = if i < locked { Attr::NONE } else { Attr::DIM };
        buffer.draw_char(x.saturating_add(i as u16), y, ch, fg, None, attrs, clip);
    }
    ClipRect::new(x, y, glyphs.len() as u16, 1)
}

// =============================================================================
// Highlight
// =============================================================================

/// Draw highlighted text: the accent bar grows left to right behind it.
pub fn draw_highlight(
    buffer: &mut FrameBuffer,
    x: u16,
    y: u16,
    sweep: &HighlightSweep,
    clip: Option<&ClipRect>,
) -> ClipRect {
    let len = sweep.text().chars().count() as u16;
    let bar = (sweep.coverage() * len as f32).round() as u16;
    if bar > 0 {
        buffer.fill_rect(ClipRect::new(x, y, bar, 1), Rgba::ACCENT, clip);
    }
    buffer.draw_text(x, y, sweep.text(), sweep.text_color(), None, Attr::NONE, clip);
    ClipRect::new(x, y, len, 1)
}

// =============================================================================
// Tests
// =============================================================================
