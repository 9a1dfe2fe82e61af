//! Input Module - event conversion and polling.
//!
//! Bridges crossterm's event system with our mouse and keyboard types.
//!
//! ```ignore
//! use flapboard::state::input::{poll_event, InputEvent};
//! use std::time::Duration;
//!
//! if let Some(InputEvent::Key(key)) = poll_event(Duration::from_millis(16))? {
//!     println!("{}", key.key);
//! }
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind, poll,
    read,
};

use super::keyboard::{KeyState, KeyboardEvent, Modifiers};
use super::mouse::{MouseAction, MouseButton, MouseEvent, ScrollDirection};

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Unified input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Key(KeyboardEvent),
    /// New terminal width and height
    Resize(u16, u16),
    /// Unhandled event type
    None,
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert any crossterm event.
pub fn convert_event(event: CrosstermEvent) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => InputEvent::Mouse(convert_mouse_event(mouse)),
        CrosstermEvent::Key(key) => InputEvent::Key(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Convert crossterm MouseEvent to our MouseEvent
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> MouseEvent {
    let (action, button, scroll) = match event.kind {
        MouseEventKind::Down(btn) => (MouseAction::Down, convert_mouse_button(btn), None),
        MouseEventKind::Up(btn) => (MouseAction::Up, convert_mouse_button(btn), None),
        MouseEventKind::Drag(btn) => (MouseAction::Drag, convert_mouse_button(btn), None),
        MouseEventKind::Moved => (MouseAction::Move, MouseButton::None, None),
        MouseEventKind::ScrollUp => (MouseAction::Scroll, MouseButton::None, Some(ScrollDirection::Up)),
        MouseEventKind::ScrollDown => (MouseAction::Scroll, MouseButton::None, Some(ScrollDirection::Down)),
        MouseEventKind::ScrollLeft => (MouseAction::Scroll, MouseButton::None, Some(ScrollDirection::Left)),
        MouseEventKind::ScrollRight => (MouseAction::Scroll, MouseButton::None, Some(ScrollDirection::Right)),
    };

    MouseEvent {
        action,
        button,
        x: event.column,
        y: event.row,
        scroll,
    }
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Wait up to `timeout` for an event.
pub fn poll_event(timeout: Duration) -> io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> io::Result<InputEvent> {
    Ok(convert_event(read()?))
}

// =============================================================================
// TESTS
// =============================================================================
