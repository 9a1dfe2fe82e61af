//! Reveal sequencer - drives every slot of a board from placeholder to target.
//!
//! The sequencer is the only owner of slot state. It is advanced with the
//! current time from a frame clock and hands out read-only snapshots.
//!
//! # Pass lifecycle
//!
//! ```text
//! start / retrigger ──► Running ──(all slots settled)──► Complete
//!         ▲                │
//!         │             cancel()
//!         │                ▼
//!         └──────────── Cancelled
//! ```
//!
//! Starting a pass always cancels every task of the previous one first, so a
//! stale pass can never write into the new one.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use flapboard::reveal::{RevealConfig, RevealSequencer};
//!
//! let config = RevealConfig::split_flap().with_seed(7).silent();
//! let mut board = RevealSequencer::new("GATE 7", config);
//!
//! board.start(Duration::ZERO);
//! board.advance(Duration::from_secs(10));
//!
//! assert!(board.is_complete());
//! assert_eq!(board.snapshot().text(), "GATE 7");
//! ```

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use super::config::{PassTiming, Placeholder, RevealConfig, SettleRule};
use super::slot::{CharacterSlot, RevealSnapshot, SlotPhase};
use super::timer::ScheduledTask;
use crate::feedback::ClickFeedback;

// =============================================================================
// TYPES
// =============================================================================

/// Which timing a pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// First display.
    Entrance,
    /// Hover or other re-trigger after the board has initialized.
    Retrigger,
}

/// Status of the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    /// No pass started yet.
    #[default]
    Idle,
    Running,
    Complete,
    /// Torn down before completing.
    Cancelled,
}

/// Emitted once per slot when it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleEvent {
    pub pass: u64,
    pub index: usize,
    pub glyph: char,
    /// Scheduled time of the settling tick.
    pub at: Duration,
}

/// Handler for per-slot settle notifications.
pub type SettleHandler = Box<dyn FnMut(&SettleEvent)>;

/// Handler for pass completion. Receives the pass number.
pub type CompleteHandler = Box<dyn FnMut(u64)>;

// =============================================================================
// SEQUENCER
// =============================================================================

/// Owns the slots of one board and runs reveal passes over them.
pub struct RevealSequencer {
    text: String,
    config: RevealConfig,
    slots: Vec<CharacterSlot>,
    rng: StdRng,
    pass: u64,
    state: PassState,
    first_pass_at: Option<Duration>,
    feedback: Option<Arc<dyn ClickFeedback>>,
    on_settle: Option<SettleHandler>,
    on_complete: Option<CompleteHandler>,
}

impl RevealSequencer {
    /// Build a board for `text`. Nothing animates until a pass starts.
    pub fn new(text: impl Into<String>, config: RevealConfig) -> Self {
        let text = text.into();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let slots = build_slots(&text, &config);
        Self {
            text,
            config,
            slots,
            rng,
            pass: 0,
            state: PassState::Idle,
            first_pass_at: None,
            feedback: None,
            on_settle: None,
            on_complete: None,
        }
    }

    /// Attach click feedback.
    pub fn with_feedback(mut self, feedback: Arc<dyn ClickFeedback>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn set_feedback(&mut self, feedback: Option<Arc<dyn ClickFeedback>>) {
        self.feedback = feedback;
    }

    /// Register the per-slot settle handler. Replaces any previous one.
    pub fn on_settle<F>(&mut self, handler: F)
    where
        F: FnMut(&SettleEvent) + 'static,
    {
        self.on_settle = Some(Box::new(handler));
    }

    /// Register the pass completion handler. Replaces any previous one.
    pub fn on_complete<F>(&mut self, handler: F)
    where
        F: FnMut(u64) + 'static,
    {
        self.on_complete = Some(Box::new(handler));
    }

    // -------------------------------------------------------------------------
    // Passes
    // -------------------------------------------------------------------------

    /// Start the entrance pass.
    pub fn start(&mut self, now: Duration) {
        self.begin_pass(now, PassKind::Entrance);
    }

    /// Restart the reveal, cancelling whatever is in flight.
    ///
    /// Uses the shorter re-trigger timing once the entrance guard has elapsed
    /// since the first pass; before that the entrance timing is reused.
    pub fn retrigger(&mut self, now: Duration) {
        let kind = match self.first_pass_at {
            Some(first) if now >= first + self.config.entrance_guard => PassKind::Retrigger,
            _ => PassKind::Entrance,
        };
        self.begin_pass(now, kind);
    }

    /// Tear down: cancel every outstanding task. Safe to call repeatedly.
    ///
    /// Slots keep whatever glyph they show; nothing mutates afterwards.
    pub fn cancel(&mut self) {
        let stopped = self.cancel_tasks();
        if self.state == PassState::Running {
            self.state = PassState::Cancelled;
            debug!(pass = self.pass, stopped, "reveal pass cancelled");
        }
    }

    /// Replace the text. A board that has run before restarts right away.
    pub fn set_text(&mut self, text: impl Into<String>, now: Duration) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.cancel_tasks();
        self.slots = build_slots(&text, &self.config);
        self.text = text;
        if self.pass > 0 {
            self.retrigger(now);
        }
    }

    fn begin_pass(&mut self, now: Duration, kind: PassKind) {
        self.cancel_tasks();
        self.pass += 1;
        if self.first_pass_at.is_none() {
            self.first_pass_at = Some(now);
        }

        let timing: PassTiming = match kind {
            PassKind::Entrance => self.config.entrance,
            PassKind::Retrigger => self.config.retrigger,
        };

        let Self { slots, config, rng, .. } = self;
        for (index, slot) in slots.iter_mut().enumerate() {
            if slot.is_space() {
                *slot = CharacterSlot::new(' ', ' ');
                continue;
            }
            let start_offset = timing.start_offset(index);
            slot.phase = SlotPhase::Waiting;
            slot.flips = 0;
            slot.threshold = config.policy.threshold(index, rng);
            slot.start_offset = start_offset;
            slot.glyph = match config.placeholder {
                Placeholder::Random => config.alphabet.pick(rng),
                Placeholder::Blank => ' ',
            };
            slot.task = Some(ScheduledTask::new(now, start_offset, config.tick_interval));
        }

        self.state = PassState::Running;
        debug!(pass = self.pass, ?kind, slots = self.slots.len(), "reveal pass started");
        self.finish_if_complete();
    }

    // -------------------------------------------------------------------------
    // Ticking
    // -------------------------------------------------------------------------

    /// Fire every tick due at or before `now`, oldest first.
    ///
    /// Returns true if any slot changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        if self.state != PassState::Running {
            return false;
        }

        let mut changed = false;
        for slot in &mut self.slots {
            if slot.phase == SlotPhase::Waiting
                && slot.task.as_ref().is_some_and(|task| task.has_started(now))
            {
                slot.phase = SlotPhase::Flipping;
                changed = true;
            }
        }

        while let Some(index) = self.earliest_due(now) {
            self.tick(index, now);
            changed = true;
        }

        self.finish_if_complete();
        changed
    }

    fn earliest_due(&self, now: Duration) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let due = slot.task.as_ref()?.next_due()?;
                (due <= now).then_some((due, index))
            })
            .min()
            .map(|(_, index)| index)
    }

    fn tick(&mut self, index: usize, now: Duration) {
        let slot = &mut self.slots[index];
        let Some(due) = slot.task.as_mut().and_then(|task| task.pop_due(now)) else {
            return;
        };
        slot.phase = SlotPhase::Flipping;

        let settles = match self.config.settle {
            SettleRule::CheckThenFlip => slot.flips >= slot.threshold,
            SettleRule::CountThenCheck => slot.flips.saturating_add(1) >= slot.threshold,
        };
        if settles {
            slot.settle();
            let event = SettleEvent {
                pass: self.pass,
                index,
                glyph: slot.glyph,
                at: due,
            };
            if self.config.click_on_settle {
                self.click();
            }
            if let Some(handler) = self.on_settle.as_mut() {
                handler(&event);
            }
            return;
        }

        slot.glyph = self.config.alphabet.pick(&mut self.rng);
        let flip = slot.flips;
        slot.flips += 1;

        let nth = self.config.click_every_nth_flip;
        if nth > 0 && flip % nth == 0 {
            self.click();
        }
    }

    fn click(&self) {
        if let Some(feedback) = &self.feedback {
            if let Err(err) = feedback.play_click() {
                trace!(%err, "click feedback skipped");
            }
        }
    }

    fn finish_if_complete(&mut self) {
        if self.state != PassState::Running || !self.slots.iter().all(CharacterSlot::is_settled) {
            return;
        }
        self.state = PassState::Complete;
        debug!(pass = self.pass, "reveal pass complete");
        if let Some(handler) = self.on_complete.as_mut() {
            handler(self.pass);
        }
    }

    fn cancel_tasks(&mut self) -> usize {
        self.slots.iter_mut().map(CharacterSlot::cancel).filter(|&stopped| stopped).count()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Time from `now` until something next changes, if a pass is running.
    pub fn next_deadline(&self, now: Duration) -> Option<Duration> {
        if self.state != PassState::Running {
            return None;
        }
        self.slots
            .iter()
            .filter_map(|slot| {
                let task = slot.task.as_ref()?;
                let due = task.next_due()?;
                Some(if slot.phase == SlotPhase::Waiting { task.start().min(due) } else { due })
            })
            .min()
            .map(|at| at.saturating_sub(now))
    }

    pub fn snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            pass: self.pass,
            slots: self.slots.iter().map(CharacterSlot::snapshot).collect(),
            complete: self.state == PassState::Complete,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn slots(&self) -> &[CharacterSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current pass number (0 before the first pass).
    pub fn pass(&self) -> u64 {
        self.pass
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PassState::Running
    }

    pub fn is_complete(&self) -> bool {
        self.state == PassState::Complete
    }
}

impl std::fmt::Debug for RevealSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealSequencer")
            .field("text", &self.text)
            .field("pass", &self.pass)
            .field("state", &self.state)
            .field("slots", &self.slots.len())
            .finish()
    }
}

fn build_slots(text: &str, config: &RevealConfig) -> Vec<CharacterSlot> {
    text.chars()
        .map(|c| CharacterSlot::new(c, config.target_for(c)))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackError;
    use crate::reveal::config::FlipPolicy;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn quiet(config: RevealConfig) -> RevealConfig {
        config.with_seed(11).silent()
    }

    /// Advance in 10ms frames until the pass completes or `limit` passes.
    fn run_to_end(board: &mut RevealSequencer, from: Duration, limit: Duration) -> Duration {
        let mut now = from;
        while !board.is_complete() && now <= limit {
            board.advance(now);
            now += ms(10);
        }
        now
    }

    struct CountingClick(AtomicUsize);

    impl ClickFeedback for CountingClick {
        fn play_click(&self) -> Result<(), FeedbackError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingClick(AtomicUsize);

    impl ClickFeedback for FailingClick {
        fn play_click(&self) -> Result<(), FeedbackError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(FeedbackError::Unsupported("audio"))
        }
    }

    #[test]
    fn test_empty_text_completes_immediately() {
        let mut board = RevealSequencer::new("", quiet(RevealConfig::split_flap()));
        let completed = Rc::new(RefCell::new(Vec::new()));
        let sink = completed.clone();
        board.on_complete(move |pass| sink.borrow_mut().push(pass));

        board.start(Duration::ZERO);

        assert!(board.is_empty());
        assert!(board.is_complete());
        assert_eq!(*completed.borrow(), vec![1]);
        assert_eq!(board.next_deadline(Duration::ZERO), None);
        assert!(board.snapshot().slots.is_empty());
    }

    #[test]
    fn test_two_char_scenario_timing() {
        let config = quiet(RevealConfig::split_flap())
            .with_tick_interval(ms(50))
            .with_entrance(PassTiming::new(ms(100), ms(100)));
        let mut board = RevealSequencer::new("AB", config);
        board.start(Duration::ZERO);

        board.advance(ms(99));
        assert_eq!(board.slots()[0].phase(), SlotPhase::Waiting);

        board.advance(ms(100));
        assert_eq!(board.slots()[0].phase(), SlotPhase::Flipping);
        assert_eq!(board.slots()[1].phase(), SlotPhase::Waiting);

        board.advance(ms(200));
        assert_eq!(board.slots()[1].phase(), SlotPhase::Flipping);

        // Slot 0: 8 flips then settles on tick 9 -> 100 + 9 * 50.
        board.advance(ms(549));
        assert!(!board.slots()[0].is_settled());
        board.advance(ms(550));
        assert!(board.slots()[0].is_settled());
        assert_eq!(board.slots()[0].glyph(), 'A');

        // Slot 1: 11 flips then settles on tick 12 -> 200 + 12 * 50.
        board.advance(ms(799));
        assert!(!board.is_complete());
        board.advance(ms(800));
        assert!(board.is_complete());
        assert_eq!(board.snapshot().text(), "AB");
    }

    #[test]
    fn test_late_advance_catches_up_with_exact_settle_times() {
        let config = quiet(RevealConfig::split_flap())
            .with_tick_interval(ms(50))
            .with_entrance(PassTiming::new(ms(100), ms(100)));
        let mut board = RevealSequencer::new("AB", config);
        let settled = Rc::new(RefCell::new(Vec::new()));
        let sink = settled.clone();
        board.on_settle(move |event| sink.borrow_mut().push((event.index, event.at)));

        board.start(Duration::ZERO);
        board.advance(ms(5_000));

        assert!(board.is_complete());
        assert_eq!(*settled.borrow(), vec![(0, ms(550)), (1, ms(800))]);
    }

    #[test]
    fn test_spaces_settle_immediately_blank() {
        let config = quiet(RevealConfig::split_flap())
            .with_entrance(PassTiming::new(ms(60_000), ms(60_000)));
        let mut board = RevealSequencer::new("A B", config);
        board.start(Duration::ZERO);

        let snap = board.snapshot();
        assert_eq!(snap.slots[1].glyph, ' ');
        assert!(snap.slots[1].is_settled());
        assert!(!snap.slots[0].is_settled());
        assert!(!snap.slots[2].is_settled());
    }

    #[test]
    fn test_unprintable_char_flips_to_blank() {
        let mut board = RevealSequencer::new("A.B", quiet(RevealConfig::split_flap()));
        board.start(Duration::ZERO);

        let slot = &board.slots()[1];
        assert_eq!(slot.target(), ' ');
        assert!(!slot.is_space());
        assert_eq!(slot.phase(), SlotPhase::Waiting);
        assert_eq!(slot.threshold(), 11);

        board.advance(ms(200));
        assert_eq!(board.slots()[1].phase(), SlotPhase::Flipping);

        board.advance(Duration::from_secs(10));
        assert!(board.is_complete());
        assert_eq!(board.snapshot().text(), "A B");
        assert_eq!(board.slots()[1].flips(), 11);
    }

    #[test]
    fn test_only_spaces_is_complete_at_start() {
        let mut board = RevealSequencer::new("   ", quiet(RevealConfig::ticker()));
        board.start(ms(3));
        assert!(board.is_complete());
        assert_eq!(board.snapshot().text(), "   ");
    }

    #[test]
    fn test_every_non_space_slot_matches_source() {
        let text = "DEPARTURES 0915 TO OSLO";
        let mut board = RevealSequencer::new(text, quiet(RevealConfig::split_flap()));
        board.start(Duration::ZERO);
        run_to_end(&mut board, Duration::ZERO, Duration::from_secs(60));

        assert!(board.is_complete());
        assert_eq!(board.snapshot().text(), text);
    }

    #[test]
    fn test_board_case_uppercases_targets() {
        let mut board = RevealSequencer::new("gate", quiet(RevealConfig::split_flap()));
        board.start(Duration::ZERO);
        board.advance(Duration::from_secs(60));
        assert_eq!(board.snapshot().text(), "GATE");
    }

    #[test]
    fn test_fixed_policy_settles_in_order() {
        let mut board = RevealSequencer::new("FLAPBOARD", quiet(RevealConfig::split_flap()));
        let times = Rc::new(RefCell::new(Vec::new()));
        let sink = times.clone();
        board.on_settle(move |event| sink.borrow_mut().push((event.index, event.at)));

        board.start(Duration::ZERO);
        run_to_end(&mut board, Duration::ZERO, Duration::from_secs(60));

        let times = times.borrow();
        assert_eq!(times.len(), 9);
        for pair in times.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn test_randomized_policy_flip_counts() {
        let mut board = RevealSequencer::new("TICKER", quiet(RevealConfig::ticker()));
        board.start(Duration::ZERO);
        board.advance(Duration::from_secs(60));

        assert!(board.is_complete());
        for slot in board.slots() {
            assert!((8..14).contains(&slot.threshold()));
            assert_eq!(slot.flips(), slot.threshold() - 1);
        }
    }

    #[test]
    fn test_ticker_settles_on_threshold_tick() {
        let mut board = RevealSequencer::new("X", quiet(RevealConfig::ticker()));
        let settled = Rc::new(RefCell::new(None));
        let sink = settled.clone();
        board.on_settle(move |event| *sink.borrow_mut() = Some(event.at));

        board.start(Duration::ZERO);
        let threshold = board.slots()[0].threshold();
        board.advance(Duration::from_secs(60));

        // 500ms entrance delay, then one 80ms tick per counted flip.
        let expected = ms(500) + ms(80) * threshold;
        assert_eq!(*settled.borrow(), Some(expected));
    }

    #[test]
    fn test_count_then_check_with_split_flap_timing() {
        let config = quiet(RevealConfig::split_flap())
            .with_settle_rule(SettleRule::CountThenCheck)
            .with_tick_interval(ms(50))
            .with_entrance(PassTiming::new(ms(100), ms(100)));
        let mut board = RevealSequencer::new("A", config);
        board.start(Duration::ZERO);

        // Threshold 8: seven glyphs, settles on the eighth tick.
        board.advance(ms(499));
        assert!(!board.is_complete());
        assert_eq!(board.slots()[0].flips(), 7);
        board.advance(ms(500));
        assert!(board.is_complete());
    }

    #[test]
    fn test_ticker_is_blank_until_start() {
        let mut board = RevealSequencer::new("GO", quiet(RevealConfig::ticker()));
        board.start(Duration::ZERO);

        let snap = board.snapshot();
        assert_eq!(snap.text(), "  ");
        assert!(snap.slots.iter().all(|s| s.phase == SlotPhase::Waiting));

        board.advance(ms(500));
        assert_eq!(board.slots()[0].phase(), SlotPhase::Flipping);
        assert_eq!(board.slots()[1].phase(), SlotPhase::Waiting);
    }

    #[test]
    fn test_cancel_stops_all_mutation() {
        let mut board = RevealSequencer::new("FREEZE", quiet(RevealConfig::split_flap()));
        board.start(Duration::ZERO);
        board.advance(ms(300));
        let frozen = board.snapshot();

        board.cancel();
        board.cancel();

        assert_eq!(board.state(), PassState::Cancelled);
        assert!(!board.advance(Duration::from_secs(60)));
        assert_eq!(board.snapshot(), frozen);
        assert_eq!(board.next_deadline(ms(300)), None);
    }

    #[test]
    fn test_retrigger_cancels_previous_pass() {
        let config = quiet(RevealConfig::split_flap()).with_entrance_guard(Duration::ZERO);
        let mut board = RevealSequencer::new("HOVER", config);
        let settled = Rc::new(RefCell::new(Vec::new()));
        let sink = settled.clone();
        board.on_settle(move |event| sink.borrow_mut().push(event.pass));

        board.start(Duration::ZERO);
        board.advance(ms(500));
        board.retrigger(ms(500));

        assert_eq!(board.pass(), 2);
        assert!(board.slots().iter().all(|s| !s.is_settled()));

        run_to_end(&mut board, ms(500), Duration::from_secs(60));
        assert_eq!(board.snapshot().text(), "HOVER");

        // Slot 0 of pass 1 settles at 450ms; nothing from pass 1 after the retrigger.
        let passes = settled.borrow();
        assert_eq!(passes.iter().filter(|&&p| p == 1).count(), 1);
        assert_eq!(passes.iter().filter(|&&p| p == 2).count(), 5);
    }

    #[test]
    fn test_entrance_guard_selects_timing() {
        let mut board = RevealSequencer::new("AB", quiet(RevealConfig::split_flap()));
        board.start(Duration::ZERO);

        board.retrigger(ms(500));
        assert_eq!(board.slots()[1].start_offset(), ms(120));

        board.retrigger(ms(2_000));
        assert_eq!(board.slots()[1].start_offset(), ms(60));
    }

    #[test]
    fn test_retrigger_before_start_is_entrance() {
        let mut board = RevealSequencer::new("AB", quiet(RevealConfig::split_flap()));
        board.retrigger(ms(40));
        assert_eq!(board.pass(), 1);
        assert_eq!(board.slots()[1].start_offset(), ms(120));
    }

    #[test]
    fn test_clicks_on_even_flips_and_settle() {
        let clicks = Arc::new(CountingClick(AtomicUsize::new(0)));
        let config = RevealConfig::split_flap().with_seed(5);
        let mut board = RevealSequencer::new("A", config).with_feedback(clicks.clone());

        board.start(Duration::ZERO);
        board.advance(Duration::from_secs(5));

        // Flips 0, 2, 4, 6 plus the settle.
        assert_eq!(clicks.0.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn test_failing_feedback_does_not_abort() {
        let clicks = Arc::new(FailingClick(AtomicUsize::new(0)));
        let config = RevealConfig::split_flap().with_seed(5);
        let mut board = RevealSequencer::new("OK", config).with_feedback(clicks.clone());

        board.start(Duration::ZERO);
        board.advance(Duration::from_secs(5));

        assert!(board.is_complete());
        assert_eq!(board.snapshot().text(), "OK");
        assert!(clicks.0.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_next_deadline_tracks_waiting_and_ticks() {
        let config = quiet(RevealConfig::split_flap())
            .with_tick_interval(ms(50))
            .with_entrance(PassTiming::new(ms(100), ms(100)));
        let mut board = RevealSequencer::new("AB", config);
        assert_eq!(board.next_deadline(Duration::ZERO), None);

        board.start(Duration::ZERO);
        assert_eq!(board.next_deadline(Duration::ZERO), Some(ms(100)));

        board.advance(ms(100));
        assert_eq!(board.next_deadline(ms(100)), Some(ms(50)));
    }

    #[test]
    fn test_set_text_restarts_running_board() {
        let mut board = RevealSequencer::new("OLD", quiet(RevealConfig::split_flap()));
        board.start(Duration::ZERO);
        board.advance(Duration::from_secs(10));

        board.set_text("NEW!", Duration::from_secs(10));
        assert_eq!(board.len(), 4);
        assert_eq!(board.pass(), 2);

        board.advance(Duration::from_secs(30));
        assert_eq!(board.snapshot().text(), "NEW ");
    }

    #[test]
    fn test_fixed_zero_threshold_settles_on_first_tick() {
        let config = quiet(RevealConfig::split_flap())
            .with_policy(FlipPolicy::Fixed { base: 0, per_index: 0 })
            .with_tick_interval(ms(50))
            .with_stagger(Duration::ZERO);
        let mut board = RevealSequencer::new("XY", config);
        board.start(Duration::ZERO);
        board.advance(ms(50));
        assert!(board.is_complete());
    }
}
