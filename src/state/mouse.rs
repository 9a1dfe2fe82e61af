//! Mouse Module - hit testing and hover tracking.
//!
//! The page paints each hoverable effect's bounds into a [`HitGrid`] after
//! every frame. Pointer moves are looked up in the grid and fed to a
//! [`HoverTracker`], which reports enter/leave transitions. An enter is what
//! re-triggers a reveal.

use spark_signals::{Signal, signal};

use crate::types::ClipRect;

// =============================================================================
// TYPES
// =============================================================================

/// Mouse action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Move,
    Drag,
    Scroll,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    /// Column (0-indexed)
    pub x: u16,
    /// Row (0-indexed)
    pub y: u16,
    /// Only set for scroll events
    pub scroll: Option<ScrollDirection>,
}

impl MouseEvent {
    pub fn new(action: MouseAction, button: MouseButton, x: u16, y: u16) -> Self {
        Self {
            action,
            button,
            x,
            y,
            scroll: None,
        }
    }

    pub fn move_to(x: u16, y: u16) -> Self {
        Self::new(MouseAction::Move, MouseButton::None, x, y)
    }

    pub fn down(button: MouseButton, x: u16, y: u16) -> Self {
        Self::new(MouseAction::Down, button, x, y)
    }

    pub fn scroll(x: u16, y: u16, direction: ScrollDirection) -> Self {
        Self {
            scroll: Some(direction),
            ..Self::new(MouseAction::Scroll, MouseButton::None, x, y)
        }
    }

    /// Moves and drags both update hover.
    pub fn is_motion(&self) -> bool {
        matches!(self.action, MouseAction::Move | MouseAction::Drag)
    }
}

// =============================================================================
// HIT GRID - O(1) Coordinate to Region Lookup
// =============================================================================

const EMPTY: usize = usize::MAX;

/// One region id per terminal cell.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<usize>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, EMPTY);
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Fill a rectangle with a region id. Later fills win.
    pub fn fill_rect(&mut self, rect: ClipRect, id: usize) {
        let bounds = ClipRect::new(0, 0, self.width, self.height);
        let Some(area) = rect.intersect(&bounds) else {
            return;
        };
        for y in area.y..area.y + area.height {
            let start = y as usize * self.width as usize + area.x as usize;
            self.cells[start..start + area.width as usize].fill(id);
        }
    }

    /// Region id at a position.
    pub fn get(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let value = self.cells[y as usize * self.width as usize + x as usize];
        (value != EMPTY).then_some(value)
    }
}

// =============================================================================
// HOVER
// =============================================================================

/// Result of a hover update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverChange {
    pub left: Option<usize>,
    pub entered: Option<usize>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }
}

/// Tracks which region the pointer is over.
///
/// The hovered id lives in a signal so render code can react to it.
#[derive(Clone)]
pub struct HoverTracker {
    hovered: Signal<Option<usize>>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self {
            hovered: signal(None),
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered.get()
    }

    /// The hovered id signal, for reactive tracking.
    pub fn hovered_signal(&self) -> Signal<Option<usize>> {
        self.hovered.clone()
    }

    /// Pointer is now over `region`. Reports the transition, if any.
    pub fn update(&self, region: Option<usize>) -> HoverChange {
        let previous = self.hovered.get();
        if previous == region {
            return HoverChange::default();
        }
        self.hovered.set(region);
        HoverChange {
            left: previous,
            entered: region,
        }
    }

    /// Look `event` up in `grid` and update. Non-motion events are ignored.
    pub fn track(&self, grid: &HitGrid, event: &MouseEvent) -> HoverChange {
        if !event.is_motion() {
            return HoverChange::default();
        }
        self.update(grid.get(event.x, event.y))
    }
}

impl Default for HoverTracker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
