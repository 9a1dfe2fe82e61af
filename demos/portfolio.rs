//! Studio landing page in the terminal.
//!
//! ```text
//! cargo run --example portfolio
//! FLAPBOARD_SOUND=1 FLAPBOARD_LOG=flapboard.log RUST_LOG=debug cargo run --example portfolio
//! ```
//!
//! Hover the board or the links to replay them, scroll to reach the
//! highlight, `m` toggles sound, `q` quits.

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flapboard::effects::{DEFAULT_OPACITY, HighlightSweep, NoiseField};
use flapboard::feedback::{ClickFeedback, TerminalClick};
use flapboard::pipeline::{MountOptions, Page, Section, mount, run};
use flapboard::reveal::{MOUNT_DURATION, RevealConfig, RevealSequencer, ScrambleReveal};
use flapboard::types::{Attr, Rgba};
use flapboard::widgets::FlapStyle;
use tracing_subscriber::EnvFilter;

const SIGNALS: &[(&str, &str, &str)] = &[
    ("2025.06.10", "Signal Field", "New interface paradigm for ambient computing environments."),
    ("2025.05.28", "Silent Agent", "Orchestration layer for autonomous design systems."),
    ("2025.05.15", "Noir Grid", "Typographic system for editorial interfaces."),
    ("2025.04.30", "Project Lattice", "Structural framework for adaptive layouts."),
    ("2025.04.12", "Echo Chamber", "Audio-visual synthesis in browser environments."),
];

/// Log to the file named by `FLAPBOARD_LOG`. Stderr would land on the board.
fn init_logging() -> flapboard::Result<()> {
    let Ok(path) = std::env::var("FLAPBOARD_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn page(click: Arc<dyn ClickFeedback>) -> Page {
    let hero = RevealSequencer::new("INTERFACE", RevealConfig::split_flap()).with_feedback(click);

    let mut page = Page::new()
        .with_noise(NoiseField::new(DEFAULT_OPACITY))
        .section(
            Section::scramble(
                ScrambleReveal::on_mount("SIGNAL", Duration::from_millis(200), MOUNT_DURATION),
                Rgba::ACCENT,
            )
            .centered(),
        )
        .section(Section::flap(hero, FlapStyle::hero()).centered())
        .section(
            Section::text()
                .styled_line("Studies in Controlled Environments", Rgba::FOREGROUND, Attr::BOLD)
                .line(
                    "We design systems that behave, not just screens that display.",
                    Rgba::MUTED,
                )
                .centered(),
        )
        .section(
            Section::scramble(
                ScrambleReveal::on_hover("View Experiments", Duration::from_millis(600)),
                Rgba::FOREGROUND,
            )
            .centered(),
        )
        .section(Section::ticker(RevealSequencer::new("Latest Signals", RevealConfig::ticker())))
        .section(Section::text().line("01 / Signals", Rgba::ACCENT));

    for (date, title, note) in SIGNALS {
        let reveal = RevealSequencer::new(*title, RevealConfig::ticker().with_entrance_guard(Duration::ZERO));
        page.push(
            Section::ticker(reveal)
                .line(*date, Rgba::MUTED)
                .line(*note, Rgba::GRAY),
        );
    }

    page.section(Section::highlight(HighlightSweep::new("controlled environments")))
        .section(Section::text().line("v.01 / Experimental Build", Rgba::MUTED))
}

fn main() -> flapboard::Result<()> {
    init_logging()?;

    let options = MountOptions {
        sound: std::env::var("FLAPBOARD_SOUND").is_ok_and(|v| v == "1"),
        ..MountOptions::default()
    };

    let handle = mount(page(Arc::new(TerminalClick::new())), options)?;
    let result = run(&handle);
    handle.unmount();
    result
}
