//! Character slots - per-character reveal state.

use std::time::Duration;

use super::timer::ScheduledTask;

/// Where a slot is within the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotPhase {
    /// Waiting for its start offset.
    #[default]
    Waiting,
    /// Ticking through placeholder glyphs.
    Flipping,
    /// Showing its target. Terminal for the pass.
    Settled,
}

/// Mutable state for one character. Owned by the sequencer.
#[derive(Debug, Clone)]
pub struct CharacterSlot {
    pub(crate) target: char,
    /// The source character was a space. Only these bypass flipping.
    pub(crate) space: bool,
    pub(crate) glyph: char,
    pub(crate) phase: SlotPhase,
    pub(crate) start_offset: Duration,
    pub(crate) flips: u32,
    pub(crate) threshold: u32,
    pub(crate) task: Option<ScheduledTask>,
}

impl CharacterSlot {
    /// A slot at rest showing the target for `source`.
    pub(crate) fn new(source: char, target: char) -> Self {
        Self {
            space: source == ' ',
            ..Self::settled(target)
        }
    }

    /// A slot at rest showing its target.
    pub(crate) fn settled(target: char) -> Self {
        Self {
            target,
            space: target == ' ',
            glyph: target,
            phase: SlotPhase::Settled,
            start_offset: Duration::ZERO,
            flips: 0,
            threshold: 0,
            task: None,
        }
    }

    pub fn target(&self) -> char {
        self.target
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn phase(&self) -> SlotPhase {
        self.phase
    }

    pub fn is_settled(&self) -> bool {
        self.phase == SlotPhase::Settled
    }

    /// True when the source character was a space. A character the
    /// alphabet cannot print also targets a blank but still flips.
    pub fn is_space(&self) -> bool {
        self.space
    }

    /// Delay from pass start until this slot begins ticking.
    pub fn start_offset(&self) -> Duration {
        self.start_offset
    }

    pub fn flips(&self) -> u32 {
        self.flips
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Cancel any pending task. Returns true if a live task was stopped.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.task.as_mut() {
            Some(task) => task.cancel(),
            None => false,
        }
    }

    /// Settle on the target and drop the task.
    pub(crate) fn settle(&mut self) {
        self.cancel();
        self.task = None;
        self.glyph = self.target;
        self.phase = SlotPhase::Settled;
    }

    pub(crate) fn snapshot(&self) -> SlotSnapshot {
        SlotSnapshot {
            glyph: self.glyph,
            target: self.target,
            phase: self.phase,
            space: self.space,
        }
    }
}

/// Read-only view of a slot for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSnapshot {
    pub glyph: char,
    pub target: char,
    pub phase: SlotPhase,
    /// Source was a space: no tile is drawn.
    pub space: bool,
}

impl SlotSnapshot {
    pub fn is_settled(&self) -> bool {
        self.phase == SlotPhase::Settled
    }
}

/// Read-only view of a whole board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevealSnapshot {
    /// Pass number; 0 before the first pass.
    pub pass: u64,
    pub slots: Vec<SlotSnapshot>,
    pub complete: bool,
}

impl RevealSnapshot {
    /// The glyphs currently shown, as a string.
    pub fn text(&self) -> String {
        self.slots.iter().map(|s| s.glyph).collect()
    }

    pub fn settled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_settled()).count()
    }
}
