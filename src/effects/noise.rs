//! Animated noise - a faint grayscale grain over the page.
//!
//! The field is kept at half the terminal resolution (one sample per 2x2
//! block of cells) and regenerated every second frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::renderer::FrameBuffer;
use crate::types::{ClipRect, Rgba};

/// Default overlay opacity.
pub const DEFAULT_OPACITY: f32 = 0.04;

/// Half-resolution grayscale noise.
#[derive(Debug, Clone)]
pub struct NoiseField {
    width: u16,
    height: u16,
    values: Vec<u8>,
    frame: u64,
    opacity: f32,
    rng: StdRng,
}

impl NoiseField {
    pub fn new(opacity: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            values: Vec::new(),
            frame: 0,
            opacity: opacity.clamp(0.0, 1.0),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Match a `cols` x `rows` area. Regenerates when the field size changes.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let width = cols.div_ceil(2);
        let height = rows.div_ceil(2);
        if width == self.width && height == self.height && !self.values.is_empty() {
            return;
        }
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    /// Count a frame. Returns true when the field was regenerated.
    pub fn advance(&mut self) -> bool {
        self.frame += 1;
        if self.frame % 2 == 0 {
            self.regenerate();
            true
        } else {
            false
        }
    }

    fn regenerate(&mut self) {
        let size = self.width as usize * self.height as usize;
        self.values.resize(size, 0);
        self.rng.fill(&mut self.values[..]);
    }

    /// Sample for terminal cell `(x, y)`.
    pub fn value_at(&self, x: u16, y: u16) -> u8 {
        let (fx, fy) = (x / 2, y / 2);
        if fx >= self.width || fy >= self.height {
            return 0;
        }
        self.values[fy as usize * self.width as usize + fx as usize]
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Blend the grain over the backgrounds inside `area`.
    pub fn paint(&self, buffer: &mut FrameBuffer, area: ClipRect) {
        let alpha = (self.opacity * 255.0).round() as u8;
        if alpha == 0 {
            return;
        }
        let Some(area) = area.intersect(&buffer.bounds()) else {
            return;
        };
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let v = self.value_at(x, y);
                buffer.tint(x, y, Rgba::new(v, v, v, alpha));
            }
        }
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(DEFAULT_OPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_resolution() {
        let mut noise = NoiseField::default().with_seed(1);
        noise.resize(81, 24);
        assert_eq!(noise.size(), (41, 12));
        assert_eq!(noise.value_at(0, 0), noise.value_at(1, 1));
    }

    #[test]
    fn test_regenerates_every_second_frame() {
        let mut noise = NoiseField::default().with_seed(2);
        noise.resize(40, 10);
        let first: Vec<u8> = (0..20).map(|x| noise.value_at(x * 2, 0)).collect();

        assert!(!noise.advance());
        let same: Vec<u8> = (0..20).map(|x| noise.value_at(x * 2, 0)).collect();
        assert_eq!(first, same);

        assert!(noise.advance());
        let next: Vec<u8> = (0..20).map(|x| noise.value_at(x * 2, 0)).collect();
        assert_ne!(first, next);
    }

    #[test]
    fn test_paint_is_faint() {
        let mut noise = NoiseField::new(0.05).with_seed(3);
        noise.resize(10, 4);
        let mut buffer = FrameBuffer::with_background(10, 4, Rgba::BACKGROUND);
        let bounds = buffer.bounds();
        noise.paint(&mut buffer, bounds);

        for cell in buffer.cells() {
            assert!((cell.bg.r - Rgba::BACKGROUND.r).abs() <= 13);
        }
    }

    #[test]
    fn test_zero_opacity_paints_nothing() {
        let mut noise = NoiseField::new(0.0).with_seed(4);
        noise.resize(4, 4);
        let mut buffer = FrameBuffer::with_background(4, 4, Rgba::BLACK);
        let before = buffer.clone();
        let bounds = buffer.bounds();
        noise.paint(&mut buffer, bounds);
        assert_eq!(buffer, before);
    }
}
