//! Highlight sweep - an accent bar wiping in behind text.
//!
//! One 1.2s timeline, played forward when the text becomes visible and in
//! reverse when it leaves:
//!
//! ```text
//! 0.0s ────────────── bar width 0 → 1 (power3-out) ─────────────── 1.2s
//!          0.5s ── text fg → black (power2-out) ── 1.1s
//! ```

use std::time::Duration;

use super::easing::{power2_out, power3_out, segment};
use crate::types::Rgba;

const TIMELINE: Duration = Duration::from_millis(1_200);
const BAR_LENGTH: f32 = 1.2;
const TEXT_START: f32 = 0.5;
const TEXT_LENGTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Stopped,
    Forward,
    Reverse,
}

/// Scroll-triggered highlight behind a span of text.
#[derive(Debug, Clone)]
pub struct HighlightSweep {
    text: String,
    position: Duration,
    playback: Playback,
    last: Option<Duration>,
    visible: bool,
}

impl HighlightSweep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: Duration::ZERO,
            playback: Playback::Stopped,
            last: None,
            visible: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Entered or left the viewport. Plays forward or reverses from the
    /// current position.
    pub fn set_visible(&mut self, visible: bool, now: Duration) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        self.playback = if visible { Playback::Forward } else { Playback::Reverse };
        self.last = Some(now);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Step to `now`. Returns true if anything moved.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.playback == Playback::Stopped {
            return false;
        }
        let dt = self.last.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last = Some(now);

        let before = self.position;
        match self.playback {
            Playback::Forward => {
                self.position = (self.position + dt).min(TIMELINE);
                if self.position >= TIMELINE {
                    self.playback = Playback::Stopped;
                }
            }
            Playback::Reverse => {
                self.position = self.position.saturating_sub(dt);
                if self.position.is_zero() {
                    self.playback = Playback::Stopped;
                }
            }
            Playback::Stopped => {}
        }
        self.position != before
    }

    /// Fraction of the text covered by the bar, in `[0, 1]`.
    pub fn coverage(&self) -> f32 {
        power3_out(segment(self.position.as_secs_f32(), 0.0, BAR_LENGTH))
    }

    /// How far the text color has moved from foreground to black.
    pub fn text_mix(&self) -> f32 {
        power2_out(segment(self.position.as_secs_f32(), TEXT_START, TEXT_LENGTH))
    }

    pub fn text_color(&self) -> Rgba {
        Rgba::lerp(Rgba::FOREGROUND, Rgba::BLACK, self.text_mix())
    }

    pub fn is_playing(&self) -> bool {
        self.playback != Playback::Stopped
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.is_playing().then_some(Duration::ZERO)
    }
}
