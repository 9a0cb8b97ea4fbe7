//! Conversions between rendered pixels and page-relative percentages.
//!
//! The model never stores pixels. The host measures the page element it is
//! drawing into and hands the engine either the full bounding rectangle
//! ([`PageRect`], for absolute pointer positions) or just its size
//! ([`Size`], for relative drag deltas).

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::PAGE_EXTENT;

/// A point or a delta, in pixels or percent depending on context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered size of a page element in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are positive and finite, i.e. usable as a divisor.
    #[must_use]
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a pixel delta into a percentage delta of this page.
    ///
    /// Returns `None` when the page has not been measured yet.
    #[must_use]
    pub fn delta_to_percent(&self, delta_px: Point) -> Option<Point> {
        if !self.is_measurable() {
            return None;
        }
        Some(Point {
            x: delta_px.x / self.width * PAGE_EXTENT,
            y: delta_px.y / self.height * PAGE_EXTENT,
        })
    }

    /// Convert a percentage delta into pixels on this page.
    #[must_use]
    pub fn percent_to_px(&self, delta_pct: Point) -> Point {
        Point {
            x: delta_pct.x / PAGE_EXTENT * self.width,
            y: delta_pct.y / PAGE_EXTENT * self.height,
        }
    }
}

/// Bounding rectangle of a rendered page in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PageRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Convert a client-space pointer position into page-relative pixels.
    #[must_use]
    pub fn to_local(&self, client: Point) -> Point {
        Point { x: client.x - self.left, y: client.y - self.top }
    }

    /// Convert a client-space pointer position into page percentages.
    ///
    /// The result is not clamped; callers clamp against the placement they
    /// are positioning. Returns `None` for an unmeasured page.
    #[must_use]
    pub fn to_percent(&self, client: Point) -> Option<Point> {
        self.size().delta_to_percent(self.to_local(client))
    }
}
