//! Click waveform - a short square-wave chirp with a decaying envelope.
//!
//! Nothing in this crate plays it: the terminal output is the bell. The
//! tone is public for downstream sample players (a sound device, a WAV
//! writer) that implement [`ClickFeedback`](super::ClickFeedback) and want
//! the same click the board is meant to make. The engine carries the tone
//! so every player shares one configuration.
//!
//! ```
//! use std::sync::Arc;
//! use flapboard::feedback::{ClickEngine, ClickTone};
//!
//! let engine = Arc::new(ClickEngine::with_writer(Vec::new()));
//! let samples = engine.tone().render_from(1000.0, 48_000);
//! assert_eq!(samples.len(), 960);
//! assert_eq!(engine.tone(), &ClickTone::default());
//! ```

use std::time::Duration;

use rand::Rng;

/// Parameters of one click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickTone {
    /// Start frequency range in Hz; each click picks uniformly from it.
    pub start_hz: (f32, f32),
    /// Frequency the chirp ramps down to.
    pub end_hz: f32,
    /// Length of the frequency ramp.
    pub sweep: Duration,
    pub start_gain: f32,
    pub end_gain: f32,
    /// Total length; the gain ramp spans all of it.
    pub length: Duration,
}

impl Default for ClickTone {
    fn default() -> Self {
        Self {
            start_hz: (800.0, 1200.0),
            end_hz: 200.0,
            sweep: Duration::from_millis(15),
            start_gain: 0.05,
            end_gain: 0.001,
            length: Duration::from_millis(20),
        }
    }
}

impl ClickTone {
    /// Render one click as mono samples in `[-start_gain, start_gain]`.
    pub fn render<R: Rng + ?Sized>(&self, sample_rate: u32, rng: &mut R) -> Vec<f32> {
        let (lo, hi) = self.start_hz;
        let start_hz = if hi > lo { rng.random_range(lo..hi) } else { lo };
        self.render_from(start_hz, sample_rate)
    }

    /// Render with a fixed start frequency.
    pub fn render_from(&self, start_hz: f32, sample_rate: u32) -> Vec<f32> {
        if sample_rate == 0 || start_hz <= 0.0 {
            return Vec::new();
        }
        let rate = sample_rate as f32;
        let count = (self.length.as_secs_f32() * rate).round() as usize;
        let sweep = self.sweep.as_secs_f32();
        let length = self.length.as_secs_f32();

        let mut phase = 0.0_f32;
        let mut samples = Vec::with_capacity(count);
        for n in 0..count {
            let t = n as f32 / rate;
            let freq = exp_ramp(start_hz, self.end_hz, t, sweep);
            let gain = exp_ramp(self.start_gain, self.end_gain, t, length);
            let square = if phase < 0.5 { 1.0 } else { -1.0 };
            samples.push(square * gain);
            phase = (phase + freq / rate).fract();
        }
        samples
    }
}

/// Exponential ramp from `from` to `to` over `span` seconds, held after.
fn exp_ramp(from: f32, to: f32, t: f32, span: f32) -> f32 {
    if span <= 0.0 || t >= span || from <= 0.0 || to <= 0.0 {
        return if t >= span { to } else { from };
    }
    from * (to / from).powf(t / span)
}
