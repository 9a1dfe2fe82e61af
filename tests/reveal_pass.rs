//! End-to-end reveal passes driven frame by frame through a page.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use flapboard::feedback::{ClickEngine, TerminalClick};
use flapboard::pipeline::{Page, Section, SectionEffect};
use flapboard::renderer::DiffRenderer;
use flapboard::reveal::{PassTiming, RevealConfig, RevealSequencer};
use flapboard::state::{FrameClock, ManualClock};
use flapboard::widgets::FlapStyle;
use pretty_assertions::assert_eq;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Clone, Default)]
struct Sink(Rc<RefCell<Vec<u8>>>);

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn board(text: &str) -> RevealSequencer {
    RevealSequencer::new(text, RevealConfig::split_flap().with_seed(42).silent())
}

fn flat_board_page(text: &str) -> Page {
    let style = FlapStyle {
        tile_width: 1,
        gap: 0,
        ..FlapStyle::default()
    };
    Page::new()
        .with_stack(flapboard::layout::StackStyle {
            gap: 0,
            padding_x: 0,
            padding_y: 0,
        })
        .section(Section::flap(board(text), style))
}

fn reveal(page: &Page) -> &RevealSequencer {
    match page.sections().first().map(Section::effect) {
        Some(SectionEffect::Flap { reveal, .. }) => reveal,
        _ => panic!("first section is not a board"),
    }
}

fn run_frames(page: &mut Page, clock: &ManualClock, until: Duration) {
    while clock.now() < until {
        let now = clock.advance(FRAME);
        page.advance(now);
    }
}

#[test]
fn test_board_settles_left_to_right_at_frame_rate() {
    let clock = ManualClock::new();
    let mut page = flat_board_page("GATE 12");
    page.start(20, 1, clock.now()).unwrap();

    let mut settled_at = vec![None; 7];
    while !reveal(&page).is_complete() && clock.now() < Duration::from_secs(30) {
        let now = clock.advance(FRAME);
        page.advance(now);
        for (i, slot) in reveal(&page).snapshot().slots.iter().enumerate() {
            if slot.is_settled() && settled_at[i].is_none() {
                settled_at[i] = Some(now);
            }
        }
    }

    let letters: Vec<Duration> = settled_at
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4)
        .map(|(_, at)| at.unwrap_or(Duration::MAX))
        .collect();
    assert!(letters.windows(2).all(|w| w[0] <= w[1]), "{letters:?}");

    let frame = page.compose(20, 1).unwrap();
    assert_eq!(frame.buffer.row_text(0), "GATE 12             ");
}

#[test]
fn test_retrigger_mid_pass_leaves_no_stale_glyphs() {
    let clock = ManualClock::new();
    let mut page = flat_board_page("OSLO");
    page.start(10, 1, clock.now()).unwrap();

    run_frames(&mut page, &clock, Duration::from_millis(300));
    assert!(!reveal(&page).is_complete());
    assert!(page.hover(0, clock.now()));
    assert_eq!(reveal(&page).pass(), 2);

    run_frames(&mut page, &clock, Duration::from_secs(10));
    assert!(reveal(&page).is_complete());
    assert_eq!(reveal(&page).snapshot().text(), "OSLO");

    // Nothing moves once settled.
    let before = reveal(&page).snapshot();
    run_frames(&mut page, &clock, Duration::from_secs(12));
    assert_eq!(reveal(&page).snapshot(), before);
}

#[test]
fn test_custom_timing_settle_schedule() {
    let config = RevealConfig::split_flap()
        .silent()
        .with_tick_interval(Duration::from_millis(50))
        .with_entrance(PassTiming::new(Duration::from_millis(100), Duration::from_millis(100)));
    let mut seq = RevealSequencer::new("AB", config);
    let settles = Rc::new(RefCell::new(Vec::new()));
    let sink = settles.clone();
    seq.on_settle(move |event| sink.borrow_mut().push((event.index, event.glyph, event.at)));

    let clock = ManualClock::new();
    seq.start(clock.now());
    while !seq.is_complete() {
        let now = clock.advance(FRAME);
        seq.advance(now);
    }

    assert_eq!(*settles.borrow(), vec![
        (0, 'A', Duration::from_millis(550)),
        (1, 'B', Duration::from_millis(800)),
    ]);
}

#[test]
fn test_settled_board_renders_nothing_new() {
    let clock = ManualClock::new();
    let mut page = flat_board_page("GO");
    page.start(6, 1, clock.now()).unwrap();
    run_frames(&mut page, &clock, Duration::from_secs(5));

    let sink = Sink::default();
    let mut renderer = DiffRenderer::with_writer(sink.clone());
    let frame = page.compose(6, 1).unwrap();
    assert_eq!(renderer.render(&frame.buffer).unwrap(), 6);

    page.advance(clock.advance(FRAME));
    let frame = page.compose(6, 1).unwrap();
    assert_eq!(renderer.render(&frame.buffer).unwrap(), 0);
}

#[test]
fn test_clicks_reach_the_engine() {
    let engine = Arc::new(ClickEngine::with_writer(Vec::new()).with_min_gap(Duration::ZERO));
    engine.set_muted(false);
    let click = Arc::new(TerminalClick::with_engine(engine.clone()));

    let mut seq = RevealSequencer::new("A", RevealConfig::split_flap().with_seed(7)).with_feedback(click);
    seq.start(Duration::ZERO);
    seq.advance(Duration::from_secs(5));

    // Every other flip of 8, plus the settle.
    assert_eq!(engine.clicks_played(), 5);

    engine.set_muted(true);
    seq.retrigger(Duration::from_secs(6));
    seq.advance(Duration::from_secs(10));
    assert_eq!(engine.clicks_played(), 5);
    assert_eq!(seq.snapshot().text(), "A");
}
