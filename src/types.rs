//! Core types for flapboard.
//!
//! Colors, cell attributes and the terminal cell itself. Everything the
//! effects draw ends up as a grid of these.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Integer channels so frames compare exactly.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Board accent (#f97316).
    pub const ACCENT: Self = Self::rgb(249, 115, 22);
    /// Page foreground, rgb(250, 250, 250).
    pub const FOREGROUND: Self = Self::rgb(250, 250, 250);
    /// Muted foreground for secondary copy.
    pub const MUTED: Self = Self::rgb(140, 140, 140);
    /// Page background.
    pub const BACKGROUND: Self = Self::rgb(10, 10, 10);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Alpha-blend `src` over `dst`.
    ///
    /// Terminal default destinations are treated as the page background.
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_terminal_default() || src.a >= 255 {
            return src;
        }
        if src.a <= 0 {
            return dst;
        }
        let dst = if dst.is_terminal_default() { Self::BACKGROUND } else { dst };
        let alpha = src.a as f32 / 255.0;
        let mix = |s: i16, d: i16| (s as f32 * alpha + d as f32 * (1.0 - alpha)).round() as i16;
        Self {
            r: mix(src.r, dst.r),
            g: mix(src.g, dst.g),
            b: mix(src.b, dst.b),
            a: 255,
        }
    }

    /// Linear interpolation between two opaque colors, `t` clamped to [0, 1].
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: i16, y: i16| (x as f32 + (y as f32 - x as f32) * t).round() as i16;
        Self {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }

    /// Same color with a new alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a: a as i16, ..self }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 5;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space).
    pub char: u32,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A rectangle in terminal cells. Used for section bounds and hit regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x as u32 + self.width as u32).min(other.x as u32 + other.width as u32);
        let y2 = (self.y as u32 + self.height as u32).min(other.y as u32 + other.height as u32);

        if x2 > x1 as u32 && y2 > y1 as u32 {
            Some(ClipRect {
                x: x1,
                y: y1,
                width: (x2 - x1 as u32) as u16,
                height: (y2 - y1 as u32) as u16,
            })
        } else {
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_half_alpha_over_black() {
        let src = Rgba::ACCENT.with_alpha(51);
        let out = Rgba::blend(src, Rgba::BLACK);
        assert_eq!(out.a, 255);
        assert_eq!(out.r, 50);
        assert_eq!(out.b, 4);
    }

    #[test]
    fn test_blend_opaque_and_transparent() {
        assert_eq!(Rgba::blend(Rgba::WHITE, Rgba::BLACK), Rgba::WHITE);
        assert_eq!(Rgba::blend(Rgba::WHITE.with_alpha(0), Rgba::GRAY), Rgba::GRAY);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgba::lerp(Rgba::FOREGROUND, Rgba::BLACK, 0.0), Rgba::FOREGROUND);
        assert_eq!(Rgba::lerp(Rgba::FOREGROUND, Rgba::BLACK, 1.0), Rgba::BLACK);
        assert_eq!(Rgba::lerp(Rgba::FOREGROUND, Rgba::BLACK, 7.0), Rgba::BLACK);
    }

    #[test]
    fn test_clip_rect_contains_and_intersect() {
        let a = ClipRect::new(2, 2, 4, 4);
        assert!(a.contains(2, 2));
        assert!(a.contains(5, 5));
        assert!(!a.contains(6, 2));

        let b = ClipRect::new(4, 4, 10, 10);
        assert_eq!(a.intersect(&b), Some(ClipRect::new(4, 4, 2, 2)));
        assert_eq!(a.intersect(&ClipRect::new(20, 20, 1, 1)), None);
    }
}
