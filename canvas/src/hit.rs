//! Hit-testing against placements on a single page.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Point, Size};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{Page, PlacementId};

/// Which part of a placement was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub placement_id: PlacementId,
    pub part: HitPart,
}

/// Test which placement (if any) is under `local_px`, a page-relative pixel point.
///
/// The selected placement's resize handle is checked first so it stays
/// grabbable when another placement overlaps the corner. Bodies are checked
/// topmost first, by `(z_index, id)` descending.
#[must_use]
pub fn hit_test(page: &Page, size: Size, local_px: Point, selected: Option<PlacementId>) -> Option<Hit> {
    let pt = size.delta_to_percent(local_px)?;

    if let Some(selected) = selected.and_then(|id| page.placement(&id)) {
        let corner = size.percent_to_px(selected.corner());
        let dx = corner.x - local_px.x;
        let dy = corner.y - local_px.y;
        if dx.hypot(dy) <= HANDLE_RADIUS_PX {
            return Some(Hit { placement_id: selected.id, part: HitPart::ResizeHandle });
        }
    }

    page.sorted_placements()
        .into_iter()
        .rev()
        .find(|p| p.contains(pt))
        .map(|p| Hit { placement_id: p.id, part: HitPart::Body })
}
