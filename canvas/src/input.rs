//! Input model: mouse buttons, keys, the selection, and the gesture state machine.
//!
//! `UiState` is what the tool panel and spread view read: which placement is
//! selected (and on which page) and which spread is showing. `InputState` is
//! the active gesture tracked between pointer-down and pointer-up, carrying
//! the context needed to turn per-frame pointer positions into incremental
//! deltas and to commit one final mutation on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{Placement, PlacementId};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key removes the selected placement.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    /// Whether this key clears the selection.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// The selected placement together with the page that owns it.
///
/// Tool actions route through the page index, so both halves are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub page_index: usize,
    pub placement_id: PlacementId,
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The currently selected placement, if any.
    pub selected: Option<Selection>,
    /// Index of the spread being shown; spread N holds pages 2N and 2N+1.
    pub spread: usize,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving a placement around its page.
    DraggingPlacement {
        /// Page holding the placement.
        page_index: usize,
        /// Id of the placement being dragged.
        id: PlacementId,
        /// Page-relative pixel position of the previous pointer event.
        last_local: Point,
        /// Placement as it was at pointer-down, used to decide whether to commit.
        origin: Placement,
    },
    /// The user is dragging the bottom-right resize handle.
    ResizingPlacement {
        /// Page holding the placement.
        page_index: usize,
        /// Id of the placement being resized.
        id: PlacementId,
        /// Page-relative pixel position of the previous pointer event.
        last_local: Point,
        /// Placement as it was at pointer-down, used to decide whether to commit.
        origin: Placement,
    },
}

impl InputState {
    /// Whether a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
