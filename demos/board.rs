//! Departure board that flips to a new destination every few seconds.
//!
//! ```text
//! cargo run --example board
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use flapboard::feedback::TerminalClick;
use flapboard::pipeline::{MountOptions, Page, Section, SectionEffect, mount, tick};
use flapboard::reveal::{RevealConfig, RevealSequencer};
use flapboard::types::Rgba;
use flapboard::widgets::FlapStyle;

const DESTINATIONS: &[&str] = &["LISBON  ", "OSAKA   ", "REYKJAVIK", "NAIROBI ", "MONTREAL"];
const HOLD: Duration = Duration::from_secs(6);

fn main() -> flapboard::Result<()> {
    let board = RevealSequencer::new(DESTINATIONS[0], RevealConfig::split_flap())
        .with_feedback(Arc::new(TerminalClick::new()));

    let page = Page::new()
        .section(Section::text().line("DEPARTURES", Rgba::ACCENT))
        .section(
            Section::flap(board, FlapStyle::hero())
                .line("gate 7  boarding", Rgba::MUTED),
        );

    let handle = mount(page, MountOptions::default())?;

    let mut next = 1;
    let mut since = Instant::now();
    while tick(&handle)? {
        if since.elapsed() < HOLD {
            continue;
        }
        since = Instant::now();
        let text = DESTINATIONS[next % DESTINATIONS.len()];
        next += 1;
        handle.with_page(|page, now| {
            if let Some(SectionEffect::Flap { reveal, .. }) = page.section_mut(1).map(|s| s.effect_mut()) {
                reveal.set_text(text, now);
            }
        });
    }

    handle.unmount();
    Ok(())
}
