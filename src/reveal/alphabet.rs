//! Glyph alphabets - the placeholder characters a slot flips through.

use rand::Rng;

const FLAP_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TICKER_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-+#@$%";
const SCRAMBLE_GLYPHS: &str = "!@#$%^&*()_+-=<>?/\\[]{}Xx";

/// A fixed, non-empty set of candidate placeholder glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphAlphabet {
    glyphs: Box<[char]>,
}

impl GlyphAlphabet {
    /// Letters and digits, as printed on a split-flap board.
    pub fn flap() -> Self {
        Self::from_static(FLAP_GLYPHS)
    }

    /// Letters, digits and a few symbols, used by the ticker reveal.
    pub fn ticker() -> Self {
        Self::from_static(TICKER_GLYPHS)
    }

    /// Punctuation noise used by the scramble effect.
    pub fn scramble() -> Self {
        Self::from_static(SCRAMBLE_GLYPHS)
    }

    /// Build an alphabet from arbitrary glyphs. Returns `None` when empty.
    pub fn custom(glyphs: &str) -> Option<Self> {
        if glyphs.is_empty() {
            return None;
        }
        Some(Self {
            glyphs: glyphs.chars().collect(),
        })
    }

    fn from_static(glyphs: &'static str) -> Self {
        Self {
            glyphs: glyphs.chars().collect(),
        }
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Never true for the built-in alphabets; `custom` rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.glyphs.contains(&c)
    }

    /// Uniform random pick.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        match self.glyphs.len() {
            0 => ' ',
            len => self.glyphs[rng.random_range(0..len)],
        }
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }
}

impl Default for GlyphAlphabet {
    fn default() -> Self {
        Self::flap()
    }
}
