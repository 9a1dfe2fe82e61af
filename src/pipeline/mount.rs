//! Mount API - terminal lifecycle, render effect and event loop.
//!
//! [`mount`] takes over the terminal (raw mode, alternate screen, mouse
//! capture) and sets up ONE render effect. The effect tracks a generation
//! counter and the terminal size signals; whenever either changes it
//! composes the page, refills the hit grid and diff-renders the frame.
//!
//! The event loop never renders directly. It advances the page to the
//! current time and bumps the generation when something moved.
//!
//! # Example
//!
//! ```ignore
//! use flapboard::pipeline::{mount, MountOptions, Page};
//!
//! let handle = mount::mount(page, MountOptions::default())?;
//! mount::run(&handle)?;
//! handle.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use spark_signals::{Signal, effect, signal};
use tracing::{debug, warn};

use super::page::Page;
use super::terminal::{
    detect_terminal_size, set_raw_mode, set_terminal_size, terminal_height_signal,
    terminal_width_signal,
};
use crate::error::Result;
use crate::feedback::click_engine;
use crate::renderer::DiffRenderer;
use crate::state::clock::{FrameClock, MonotonicClock};
use crate::state::input::{self, InputEvent};
use crate::state::keyboard::KeyboardEvent;
use crate::state::mouse::{HitGrid, HoverTracker, MouseEvent, ScrollDirection};

/// Rows per wheel notch.
const WHEEL_STEP: i32 = 3;

// =============================================================================
// Options
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOptions {
    /// Longest wait between frames while anything animates.
    pub frame: Duration,
    /// Start with click sound on.
    pub sound: bool,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            frame: Duration::from_millis(16),
            sound: false,
        }
    }
}

// =============================================================================
// Key map
// =============================================================================

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleSound,
    /// Scroll by rows.
    Scroll(i32),
    /// Scroll by viewports.
    Page(i32),
    Top,
    Bottom,
}

/// Map a key event to a command. Releases map to nothing.
pub fn command_for(key: &KeyboardEvent) -> Option<Command> {
    if !key.is_press() {
        return None;
    }
    if key.is_ctrl("c") {
        return Some(Command::Quit);
    }
    // Everything else is bound without Ctrl or Alt.
    if key.modifiers.ctrl || key.modifiers.alt {
        return None;
    }
    let command = match key.key.as_str() {
        "q" | "Escape" => Command::Quit,
        "m" => Command::ToggleSound,
        "ArrowDown" | "j" => Command::Scroll(1),
        "ArrowUp" | "k" => Command::Scroll(-1),
        "PageDown" | " " => Command::Page(1),
        "PageUp" => Command::Page(-1),
        "Home" => Command::Top,
        "End" => Command::Bottom,
        _ => return None,
    };
    Some(command)
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`].
///
/// Dropping it restores the terminal, same as [`unmount`](Self::unmount).
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    page: Rc<RefCell<Page>>,
    renderer: Rc<RefCell<DiffRenderer>>,
    hit_grid: Rc<RefCell<HitGrid>>,
    hover: HoverTracker,
    generation: Signal<u64>,
    clock: MonotonicClock,
    options: MountOptions,
    restored: bool,
}

impl MountHandle {
    /// Stop the render effect and give the terminal back.
    pub fn unmount(mut self) {
        self.restore();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask the loop to exit after the current tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Flag shared with other threads (a signal handler, say).
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        self.running.clone()
    }

    /// Mutate the page, then render.
    pub fn with_page<R>(&self, f: impl FnOnce(&mut Page, Duration) -> R) -> R {
        let now = self.clock.now();
        let result = f(&mut self.page.borrow_mut(), now);
        self.bump();
        result
    }

    /// Counter the render effect tracks.
    pub fn generation_signal(&self) -> Signal<u64> {
        self.generation.clone()
    }

    /// Region currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hover.hovered()
    }

    fn bump(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    fn dispatch(&self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Key(key) => {
                if let Some(command) = command_for(&key) {
                    self.apply(command)?;
                }
            }
            InputEvent::Mouse(mouse) => self.on_mouse(&mouse)?,
            InputEvent::Resize(width, height) => {
                let now = self.clock.now();
                self.page.borrow_mut().resize(width, height, now)?;
                self.renderer.borrow_mut().invalidate();
                set_terminal_size(width, height);
            }
            InputEvent::None => {}
        }
        Ok(())
    }

    fn apply(&self, command: Command) -> Result<()> {
        let rows = match command {
            Command::Quit => {
                debug!("quit requested");
                self.stop();
                return Ok(());
            }
            Command::ToggleSound => {
                let muted = click_engine().toggle_mute();
                debug!(muted, "click sound toggled");
                return Ok(());
            }
            Command::Scroll(rows) => rows,
            Command::Page(pages) => {
                let height = self.page.borrow().viewport().1.saturating_sub(1).max(1);
                pages * height as i32
            }
            Command::Top => i32::MIN / 2,
            Command::Bottom => i32::MAX / 2,
        };
        self.scroll(rows)
    }

    fn scroll(&self, rows: i32) -> Result<()> {
        let now = self.clock.now();
        let before = self.page.borrow().scroll();
        let after = self.page.borrow_mut().scroll_by(rows, now)?;
        if after != before {
            self.bump();
        }
        Ok(())
    }

    fn on_mouse(&self, event: &MouseEvent) -> Result<()> {
        match event.scroll {
            Some(ScrollDirection::Down) => return self.scroll(WHEEL_STEP),
            Some(ScrollDirection::Up) => return self.scroll(-WHEEL_STEP),
            _ => {}
        }

        let change = self.hover.track(&self.hit_grid.borrow(), event);
        if let Some(id) = change.entered {
            let now = self.clock.now();
            let restarted = self.page.borrow_mut().hover(id, now);
            if restarted {
                debug!(region = id, "hover retrigger");
                self.bump();
            }
        }
        Ok(())
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        self.running.store(false, Ordering::SeqCst);

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Err(err) = self.renderer.borrow_mut().exit_fullscreen() {
            warn!(%err, "failed to leave fullscreen");
        }
        if let Err(err) = set_raw_mode(false) {
            warn!(%err, "failed to leave raw mode");
        }
        debug!("unmounted");
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.restore();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal and start rendering `page`.
///
/// The page's entrance animations start now.
pub fn mount(page: Page, options: MountOptions) -> Result<MountHandle> {
    let (width, height) = detect_terminal_size();
    click_engine().set_muted(!options.sound);

    set_raw_mode(true)?;
    let mut renderer = DiffRenderer::new();
    if let Err(err) = renderer.enter_fullscreen() {
        let _ = set_raw_mode(false);
        return Err(err.into());
    }

    let clock = MonotonicClock::new();
    let mut page = page;
    page.start(width, height, clock.now())?;

    let page = Rc::new(RefCell::new(page));
    let renderer = Rc::new(RefCell::new(renderer));
    let hit_grid = Rc::new(RefCell::new(HitGrid::new(width, height)));
    let generation = signal(0u64);
    let running = Arc::new(AtomicBool::new(true));

    let stop = {
        let page = page.clone();
        let renderer = renderer.clone();
        let hit_grid = hit_grid.clone();
        let generation = generation.clone();
        let running = running.clone();
        let width_signal = terminal_width_signal();
        let height_signal = terminal_height_signal();

        effect(move || {
            // Track before the early return so the effect stays subscribed.
            let _ = generation.get();
            let (width, height) = (width_signal.get(), height_signal.get());
            if !running.load(Ordering::SeqCst) {
                return;
            }

            let frame = match page.borrow().compose(width, height) {
                Ok(frame) => frame,
                Err(err) => {
                    warn!(%err, "compose failed");
                    return;
                }
            };

            {
                let mut grid = hit_grid.borrow_mut();
                if (grid.width(), grid.height()) != (width, height) {
                    grid.resize(width, height);
                } else {
                    grid.clear();
                }
                for region in &frame.hit_regions {
                    grid.fill_rect(region.rect, region.id);
                }
            }

            if let Err(err) = renderer.borrow_mut().render(&frame.buffer) {
                warn!(%err, "render failed");
            }
        })
    };

    debug!(width, height, sound = options.sound, "mounted");

    Ok(MountHandle {
        stop_effect: Some(Box::new(stop)),
        running,
        page,
        renderer,
        hit_grid,
        hover: HoverTracker::new(),
        generation,
        clock,
        options,
        restored: false,
    })
}

// =============================================================================
// Event Loop
// =============================================================================

/// One turn of the loop: wait for input until the next animation deadline
/// (at most one frame), handle it, advance the page.
///
/// Returns `Ok(false)` once a quit was requested.
pub fn tick(handle: &MountHandle) -> Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    let frame = handle.options.frame;
    let wait = handle
        .page
        .borrow()
        .next_deadline(handle.clock.now())
        .map_or(frame, |deadline| deadline.min(frame));

    if let Some(event) = input::poll_event(wait)? {
        handle.dispatch(event)?;
    }

    let changed = handle.page.borrow_mut().advance(handle.clock.now());
    if changed {
        handle.bump();
    }

    Ok(handle.is_running())
}

/// Run the event loop until stopped.
pub fn run(handle: &MountHandle) -> Result<()> {
    while tick(handle)? {}
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
