//! Shared numeric constants for the canvas crate.

// ── Page geometry ───────────────────────────────────────────────

/// Extent of a page along either axis, in percent.
pub const PAGE_EXTENT: f64 = 100.0;

/// Width and height given to a freshly dropped placement, in percent.
pub const DEFAULT_PLACEMENT_SIZE: f64 = 25.0;

/// Smallest width or height a placement may be resized to, in percent.
pub const MIN_PLACEMENT_SIZE: f64 = 10.0;

/// Offset applied to both axes when duplicating a placement, in percent.
pub const DUPLICATE_OFFSET: f64 = 5.0;

/// Upper bound for a duplicate's x/y before page clamping, in percent.
pub const DUPLICATE_MAX_POSITION: f64 = 90.0;

/// Background color of a newly added page.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Pages shown together in one spread.
pub const PAGES_PER_SPREAD: usize = 2;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for the resize handle.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Geometry changes smaller than this (percent) are not committed on pointer-up.
pub const COMMIT_EPSILON: f64 = 0.01;
