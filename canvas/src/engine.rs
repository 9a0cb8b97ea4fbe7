//! Interaction engine: placement operations, selection, and spread navigation.
//!
//! Every operation runs synchronously against in-memory state and returns the
//! [`Action`]s it produced. An empty action list means nothing changed: the
//! page or placement did not exist, the page has not been measured yet, or
//! the engine is locked because the photobook was submitted.

use crate::camera::{PageRect, Point, Size};
use crate::consts::{COMMIT_EPSILON, PAGES_PER_SPREAD};
use crate::doc::{Page, PageStore, PhotoId, Placement, PlacementId};
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, InputState, Key, Selection, UiState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    PlacementCreated { page_index: usize, placement: Placement },
    PlacementUpdated { page_index: usize, placement: Placement },
    PlacementDeleted { page_index: usize, id: PlacementId },
    PageUpdated { page_index: usize },
    PagesAdded { first_index: usize },
    SelectionChanged(Option<Selection>),
    SpreadChanged(usize),
    RenderNeeded,
}

/// Editor state for one photobook: pages, selection, gesture, and page size.
#[derive(Debug, Clone, Default)]
pub struct EngineCore {
    pub pages: PageStore,
    pub ui: UiState,
    pub input: InputState,
    /// Rendered size of one page in CSS pixels; both pages of a spread share it.
    pub page_size: Size,
    locked: bool,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace all pages with a persisted snapshot and reset interaction state.
    pub fn load_pages(&mut self, pages: Vec<Page>) {
        self.pages = PageStore::from_pages(pages);
        self.ui = UiState::default();
        self.input = InputState::Idle;
    }

    /// Update the measured page size used for pixel-to-percent conversion.
    pub fn set_page_size(&mut self, width: f64, height: f64) {
        self.page_size = Size::new(width, height);
    }

    /// Refuse all further mutations. Selection and navigation keep working.
    pub fn lock(&mut self) {
        self.locked = true;
        self.input = InputState::Idle;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // --- Placement operations ---

    /// Drop a library photo onto a page at a client-space pointer position.
    ///
    /// The pointer is clamped into the page rather than rejected. The new
    /// placement is stacked on top and becomes the selection.
    pub fn drop_photo(
        &mut self,
        page_index: usize,
        photo_id: impl Into<PhotoId>,
        rect: PageRect,
        pointer: Point,
    ) -> Vec<Action> {
        if self.locked {
            return Vec::new();
        }
        let Some(pct) = rect.to_percent(pointer) else {
            return Vec::new();
        };
        let Some(page) = self.pages.get_mut(page_index) else {
            return Vec::new();
        };
        let placement = Placement::new(photo_id, pct.x, pct.y, page.next_z_index());
        page.photos.push(placement.clone());

        let mut actions = vec![Action::PlacementCreated { page_index, placement: placement.clone() }];
        actions.extend(self.set_selection(Some(Selection { page_index, placement_id: placement.id })));
        actions
    }

    /// Move a placement by a pixel delta measured on the rendered page.
    pub fn drag_move(&mut self, page_index: usize, id: &PlacementId, delta_px: Point) -> Vec<Action> {
        let Some(delta) = self.page_size.delta_to_percent(delta_px) else {
            return Vec::new();
        };
        self.mutate_placement(page_index, id, |p| p.translate(delta))
    }

    /// Resize a placement by a pixel delta measured on the rendered page.
    pub fn drag_resize(&mut self, page_index: usize, id: &PlacementId, delta_px: Point) -> Vec<Action> {
        let Some(delta) = self.page_size.delta_to_percent(delta_px) else {
            return Vec::new();
        };
        self.mutate_placement(page_index, id, |p| p.resize(delta))
    }

    /// Rotate a placement a quarter turn clockwise.
    pub fn rotate(&mut self, page_index: usize, id: &PlacementId) -> Vec<Action> {
        self.mutate_placement(page_index, id, Placement::rotate)
    }

    /// Stack a placement above every other placement on its page.
    pub fn bring_to_front(&mut self, page_index: usize, id: &PlacementId) -> Vec<Action> {
        let Some(top) = self.pages.get(page_index).map(Page::next_z_index) else {
            return Vec::new();
        };
        self.mutate_placement(page_index, id, |p| p.z_index = top)
    }

    /// Copy a placement onto the same page, offset and stacked on top.
    /// The copy becomes the selection.
    pub fn duplicate(&mut self, page_index: usize, id: &PlacementId) -> Vec<Action> {
        if self.locked {
            return Vec::new();
        }
        let Some(page) = self.pages.get_mut(page_index) else {
            return Vec::new();
        };
        let top = page.next_z_index();
        let Some(copy) = page.placement(id).map(|p| p.duplicate(top)) else {
            return Vec::new();
        };
        page.photos.push(copy.clone());

        let mut actions = vec![Action::PlacementCreated { page_index, placement: copy.clone() }];
        actions.extend(self.set_selection(Some(Selection { page_index, placement_id: copy.id })));
        actions
    }

    /// Remove a placement from its page, clearing the selection if it pointed there.
    pub fn delete(&mut self, page_index: usize, id: &PlacementId) -> Vec<Action> {
        if self.locked {
            return Vec::new();
        }
        let Some(page) = self.pages.get_mut(page_index) else {
            return Vec::new();
        };
        if page.remove(id).is_none() {
            return Vec::new();
        }

        let mut actions = vec![Action::PlacementDeleted { page_index, id: *id }];
        if self.ui.selected.is_some_and(|s| s.page_index == page_index && s.placement_id == *id) {
            actions.extend(self.set_selection(None));
        }
        actions
    }

    /// Change a page's background color.
    pub fn set_page_background(&mut self, page_index: usize, color: &str) -> Vec<Action> {
        if self.locked {
            return Vec::new();
        }
        let Some(page) = self.pages.get_mut(page_index) else {
            return Vec::new();
        };
        color.clone_into(&mut page.background_color);
        vec![Action::PageUpdated { page_index }]
    }

    fn mutate_placement<F>(&mut self, page_index: usize, id: &PlacementId, f: F) -> Vec<Action>
    where
        F: FnOnce(&mut Placement),
    {
        if self.locked {
            return Vec::new();
        }
        let Some(placement) = self.pages.get_mut(page_index).and_then(|page| page.placement_mut(id)) else {
            return Vec::new();
        };
        f(placement);
        vec![Action::PlacementUpdated { page_index, placement: placement.clone() }]
    }

    // --- Selection ---

    /// Select a placement. No-op if it does not exist on that page.
    pub fn select(&mut self, page_index: usize, id: &PlacementId) -> Vec<Action> {
        if self.placement(page_index, id).is_none() {
            return Vec::new();
        }
        self.set_selection(Some(Selection { page_index, placement_id: *id }))
    }

    pub fn clear_selection(&mut self) -> Vec<Action> {
        self.set_selection(None)
    }

    fn set_selection(&mut self, selection: Option<Selection>) -> Vec<Action> {
        if self.ui.selected == selection {
            return Vec::new();
        }
        self.ui.selected = selection;
        vec![Action::SelectionChanged(selection)]
    }

    /// Run a placement operation against the current selection.
    fn with_selection<F>(&mut self, op: F) -> Vec<Action>
    where
        F: FnOnce(&mut Self, usize, &PlacementId) -> Vec<Action>,
    {
        let Some(selection) = self.ui.selected else {
            return Vec::new();
        };
        op(self, selection.page_index, &selection.placement_id)
    }

    pub fn rotate_selected(&mut self) -> Vec<Action> {
        self.with_selection(Self::rotate)
    }

    pub fn duplicate_selected(&mut self) -> Vec<Action> {
        self.with_selection(Self::duplicate)
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.with_selection(Self::delete)
    }

    pub fn bring_selected_to_front(&mut self) -> Vec<Action> {
        self.with_selection(Self::bring_to_front)
    }

    /// Change the background of the page holding the selected placement.
    pub fn set_selected_page_background(&mut self, color: &str) -> Vec<Action> {
        self.with_selection(|core, page_index, _| core.set_page_background(page_index, color))
    }

    // --- Spread navigation ---

    /// Number of spreads in the book.
    #[must_use]
    pub fn spread_count(&self) -> usize {
        self.pages.len().div_ceil(PAGES_PER_SPREAD)
    }

    /// Page indices shown by the current spread: left, and right when present.
    #[must_use]
    pub fn spread_page_indices(&self) -> (usize, Option<usize>) {
        let left = self.ui.spread * PAGES_PER_SPREAD;
        let right = left + 1;
        (left, (right < self.pages.len()).then_some(right))
    }

    pub fn next_spread(&mut self) -> Vec<Action> {
        if self.ui.spread + 1 >= self.spread_count() {
            return Vec::new();
        }
        self.ui.spread += 1;
        vec![Action::SpreadChanged(self.ui.spread)]
    }

    pub fn prev_spread(&mut self) -> Vec<Action> {
        if self.ui.spread == 0 {
            return Vec::new();
        }
        self.ui.spread -= 1;
        vec![Action::SpreadChanged(self.ui.spread)]
    }

    /// Jump to the spread holding `page_index` (page-thumbnail strip).
    pub fn go_to_page(&mut self, page_index: usize) -> Vec<Action> {
        if page_index >= self.pages.len() {
            return Vec::new();
        }
        let spread = page_index / PAGES_PER_SPREAD;
        if spread == self.ui.spread {
            return Vec::new();
        }
        self.ui.spread = spread;
        vec![Action::SpreadChanged(spread)]
    }

    /// Append two empty pages and show them.
    pub fn add_spread(&mut self) -> Vec<Action> {
        if self.locked {
            return Vec::new();
        }
        let first_index = self.pages.add_spread();
        self.ui.spread = first_index / PAGES_PER_SPREAD;
        vec![Action::PagesAdded { first_index }, Action::SpreadChanged(self.ui.spread)]
    }

    // --- Gestures ---

    /// Start a move or resize gesture at a page-relative pixel position.
    ///
    /// Clicking empty page area clears the selection.
    pub fn on_pointer_down(&mut self, page_index: usize, local: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || self.locked {
            return Vec::new();
        }
        let Some(page) = self.pages.get(page_index) else {
            return Vec::new();
        };
        let selected = self
            .ui
            .selected
            .filter(|s| s.page_index == page_index)
            .map(|s| s.placement_id);

        let Some(hit) = hit_test(page, self.page_size, local, selected) else {
            return self.clear_selection();
        };
        let Some(origin) = page.placement(&hit.placement_id).cloned() else {
            return Vec::new();
        };

        let id = hit.placement_id;
        self.input = match hit.part {
            HitPart::Body => InputState::DraggingPlacement { page_index, id, last_local: local, origin },
            HitPart::ResizeHandle => InputState::ResizingPlacement { page_index, id, last_local: local, origin },
        };

        let mut actions = self.set_selection(Some(Selection { page_index, placement_id: id }));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Apply the pointer movement since the previous event to the active gesture.
    pub fn on_pointer_move(&mut self, local: Point) -> Vec<Action> {
        let (page_index, id, last, resizing) = match &self.input {
            InputState::Idle => return Vec::new(),
            InputState::DraggingPlacement { page_index, id, last_local, .. } => (*page_index, *id, *last_local, false),
            InputState::ResizingPlacement { page_index, id, last_local, .. } => (*page_index, *id, *last_local, true),
        };

        let delta = Point::new(local.x - last.x, local.y - last.y);
        let applied = if resizing {
            self.drag_resize(page_index, &id, delta)
        } else {
            self.drag_move(page_index, &id, delta)
        };

        match &mut self.input {
            InputState::DraggingPlacement { last_local, .. } | InputState::ResizingPlacement { last_local, .. } => {
                *last_local = local;
            }
            InputState::Idle => {}
        }

        if applied.is_empty() { Vec::new() } else { vec![Action::RenderNeeded] }
    }

    /// Finish the active gesture, committing one update if the geometry moved.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let (page_index, id, origin) = match std::mem::take(&mut self.input) {
            InputState::Idle => return Vec::new(),
            InputState::DraggingPlacement { page_index, id, origin, .. }
            | InputState::ResizingPlacement { page_index, id, origin, .. } => (page_index, id, origin),
        };

        match self.placement(page_index, &id) {
            Some(current) if current.geometry_differs(&origin, COMMIT_EPSILON) => {
                vec![Action::PlacementUpdated { page_index, placement: current.clone() }]
            }
            _ => Vec::new(),
        }
    }

    /// Keyboard shortcuts: Delete/Backspace removes the selection, Escape clears it.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_delete() {
            self.delete_selected()
        } else if key.is_escape() {
            self.clear_selection()
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// The currently selected placement, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.ui.selected
    }

    /// Index of the spread being shown.
    #[must_use]
    pub fn current_spread(&self) -> usize {
        self.ui.spread
    }

    #[must_use]
    pub fn page(&self, page_index: usize) -> Option<&Page> {
        self.pages.get(page_index)
    }

    /// Look up a placement on a page.
    #[must_use]
    pub fn placement(&self, page_index: usize, id: &PlacementId) -> Option<&Placement> {
        self.pages.get(page_index).and_then(|page| page.placement(id))
    }

    /// The selected placement itself, for the tool panel.
    #[must_use]
    pub fn selected_placement(&self) -> Option<&Placement> {
        let selection = self.ui.selected?;
        self.placement(selection.page_index, &selection.placement_id)
    }
}
