//! Keyboard event types.
//!
//! Keys are named the way a browser names them ("q", "Escape", "ArrowDown"),
//! so key maps read the same regardless of where the event came from.

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A plain key press.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::default())
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press or auto-repeat.
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }

    /// True for `key` pressed with no Ctrl or Alt.
    pub fn is(&self, key: &str) -> bool {
        self.key == key && !self.modifiers.ctrl && !self.modifiers.alt
    }

    /// True for Ctrl + `key`.
    pub fn is_ctrl(&self, key: &str) -> bool {
        self.modifiers.ctrl && self.key.eq_ignore_ascii_case(key)
    }
}
