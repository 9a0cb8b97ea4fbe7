//! Document model: photo placements, pages, and the in-memory page store.
//!
//! This module defines the data that describes a photobook under design
//! (`Placement`, `Page`, `BookFormat`, `PhotobookStatus`), the clamping rules
//! that keep every placement inside its page, and the runtime store that owns
//! the ordered page list (`PageStore`).
//!
//! Data flows into this layer from storage (JSON deserialization) and from
//! the interaction engine (mutations). Every geometry mutation ends with
//! [`Placement::clamp_to_page`], so callers never observe a placement that
//! extends past the page edge.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_PLACEMENT_SIZE, DUPLICATE_MAX_POSITION, DUPLICATE_OFFSET, MIN_PLACEMENT_SIZE,
    PAGE_EXTENT, PAGES_PER_SPREAD,
};

/// Unique identifier for a placement. Distinct from the photo it shows.
pub type PlacementId = Uuid;

/// Identifier of a photo owned by the gallery service.
pub type PhotoId = String;

/// A gallery photo the editor can place. Read-only to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    /// Full-size display URL.
    pub url: String,
    /// Thumbnail URL for the library panel.
    pub thumbnail_url: String,
    /// Ordinal position within the source gallery.
    pub index: u32,
}

// =============================================================================
// ROTATION
// =============================================================================

/// Quarter-turn rotation of a placement.
///
/// Serialized as a bare number of degrees. Any multiple of 90 is accepted on
/// input and normalized into `0..360`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// A rotation value that is not a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rotation must be a multiple of 90 degrees, got {0}")]
pub struct InvalidRotation(pub i64);

impl Rotation {
    /// Rotation in degrees, one of 0, 90, 180, 270.
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// The next quarter turn clockwise, wrapping at 360.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }

    /// Whether width and height swap visually at this rotation.
    #[must_use]
    pub fn is_sideways(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    fn from_normalized(deg: u16) -> Option<Self> {
        match deg {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }
}

impl TryFrom<i64> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let normalized = value.rem_euclid(360);
        u16::try_from(normalized)
            .map_err(|_| InvalidRotation(value))
            .and_then(|deg| Self::from_normalized(deg).ok_or(InvalidRotation(value)))
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// One photo positioned on one page, in page percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Locally generated identity; a photo may be placed several times.
    pub id: PlacementId,
    /// The gallery photo this placement displays.
    pub photo_id: PhotoId,
    /// Left edge, percent of page width.
    pub x: f64,
    /// Top edge, percent of page height.
    pub y: f64,
    /// Width, percent of page width.
    pub width: f64,
    /// Height, percent of page height.
    pub height: f64,
    /// Quarter-turn rotation around the placement center.
    #[serde(default)]
    pub rotation: Rotation,
    /// Stacking order; higher values are drawn above lower ones.
    pub z_index: i64,
}

impl Placement {
    /// Create a default-sized placement with its top-left corner at `(x, y)`,
    /// clamped into the page.
    #[must_use]
    pub fn new(photo_id: impl Into<PhotoId>, x: f64, y: f64, z_index: i64) -> Self {
        let mut placement = Self {
            id: Uuid::new_v4(),
            photo_id: photo_id.into(),
            x,
            y,
            width: DEFAULT_PLACEMENT_SIZE,
            height: DEFAULT_PLACEMENT_SIZE,
            rotation: Rotation::Deg0,
            z_index,
        };
        placement.clamp_to_page();
        placement
    }

    /// Enforce the page invariant: size within `[MIN, 100]`, then position
    /// within `[0, 100 - size]`. Non-finite values fall back to the default
    /// size or the page origin.
    pub fn clamp_to_page(&mut self) {
        self.width = finite_or(self.width, DEFAULT_PLACEMENT_SIZE).clamp(MIN_PLACEMENT_SIZE, PAGE_EXTENT);
        self.height = finite_or(self.height, DEFAULT_PLACEMENT_SIZE).clamp(MIN_PLACEMENT_SIZE, PAGE_EXTENT);
        self.x = finite_or(self.x, 0.0).clamp(0.0, PAGE_EXTENT - self.width);
        self.y = finite_or(self.y, 0.0).clamp(0.0, PAGE_EXTENT - self.height);
    }

    /// Move by a percentage delta, staying inside the page.
    pub fn translate(&mut self, delta: Point) {
        self.x += delta.x;
        self.y += delta.y;
        self.clamp_to_page();
    }

    /// Grow or shrink by a percentage delta. The top-left corner stays put;
    /// the size is capped by the remaining page extent and floored at the minimum.
    pub fn resize(&mut self, delta: Point) {
        self.width = (self.width + delta.x).min(PAGE_EXTENT - self.x).max(MIN_PLACEMENT_SIZE);
        self.height = (self.height + delta.y).min(PAGE_EXTENT - self.y).max(MIN_PLACEMENT_SIZE);
        self.clamp_to_page();
    }

    /// Advance the rotation by one quarter turn.
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.next();
    }

    /// Clone with a fresh id, offset position, and the given z-index.
    #[must_use]
    pub fn duplicate(&self, z_index: i64) -> Self {
        let mut copy = Self {
            id: Uuid::new_v4(),
            x: (self.x + DUPLICATE_OFFSET).min(DUPLICATE_MAX_POSITION),
            y: (self.y + DUPLICATE_OFFSET).min(DUPLICATE_MAX_POSITION),
            z_index,
            ..self.clone()
        };
        copy.clamp_to_page();
        copy
    }

    /// Whether a page-percentage point lies inside the bounding box.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Bottom-right corner in page percentages (the resize handle position).
    #[must_use]
    pub fn corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Whether position or size differs from `other` by more than `epsilon`.
    #[must_use]
    pub fn geometry_differs(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() > epsilon
            || (self.y - other.y).abs() > epsilon
            || (self.width - other.width).abs() > epsilon
            || (self.height - other.height).abs() > epsilon
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

// =============================================================================
// PAGE
// =============================================================================

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_owned()
}

/// One printable surface of the photobook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Storage id, present once the page has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 1-based position in the book.
    pub page_number: u32,
    /// Placements on this page; draw order is `z_index`, not list order.
    #[serde(default)]
    pub photos: Vec<Placement>,
    /// CSS color behind the placements.
    #[serde(default = "default_background")]
    pub background_color: String,
}

impl Page {
    /// An empty white page.
    #[must_use]
    pub fn new(page_number: u32) -> Self {
        Self { id: None, page_number, photos: Vec::new(), background_color: default_background() }
    }

    /// Highest z-index on the page, or 0 when it is empty.
    #[must_use]
    pub fn max_z_index(&self) -> i64 {
        self.photos.iter().map(|p| p.z_index).max().unwrap_or(0)
    }

    /// z-index that stacks above everything on the page. Saturates at `i64::MAX`.
    #[must_use]
    pub fn next_z_index(&self) -> i64 {
        self.max_z_index().saturating_add(1)
    }

    #[must_use]
    pub fn placement(&self, id: &PlacementId) -> Option<&Placement> {
        self.photos.iter().find(|p| p.id == *id)
    }

    pub fn placement_mut(&mut self, id: &PlacementId) -> Option<&mut Placement> {
        self.photos.iter_mut().find(|p| p.id == *id)
    }

    /// Remove a placement by id, returning it if it was present.
    pub fn remove(&mut self, id: &PlacementId) -> Option<Placement> {
        let index = self.photos.iter().position(|p| p.id == *id)?;
        Some(self.photos.remove(index))
    }

    /// Placements sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn sorted_placements(&self) -> Vec<&Placement> {
        let mut placements: Vec<&Placement> = self.photos.iter().collect();
        placements.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        placements
    }

    /// Clamp every placement into the page.
    pub fn clamp_placements(&mut self) {
        for placement in &mut self.photos {
            placement.clamp_to_page();
        }
    }
}

// =============================================================================
// PAGE STORE
// =============================================================================

/// Ordered pages of one photobook. Always holds an even, non-zero number of pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStore {
    pages: Vec<Page>,
}

impl PageStore {
    /// A store seeded with one empty spread (pages 1 and 2).
    #[must_use]
    pub fn new() -> Self {
        let mut store = Self { pages: Vec::new() };
        store.add_spread();
        store
    }

    /// Build a store from persisted pages.
    ///
    /// Pages are ordered by page number, placements are clamped, and an empty
    /// page is appended if storage returned an odd count.
    #[must_use]
    pub fn from_pages(mut pages: Vec<Page>) -> Self {
        if pages.is_empty() {
            return Self::new();
        }
        pages.sort_by_key(|p| p.page_number);
        for page in &mut pages {
            page.clamp_placements();
        }
        let mut store = Self { pages };
        if store.pages.len() % PAGES_PER_SPREAD != 0 {
            let next = store.next_page_number();
            store.pages.push(Page::new(next));
        }
        store
    }

    /// Append two empty pages, returning the index of the first one.
    pub fn add_spread(&mut self) -> usize {
        let first_index = self.pages.len();
        for _ in 0..PAGES_PER_SPREAD {
            let number = self.next_page_number();
            self.pages.push(Page::new(number));
        }
        first_index
    }

    fn next_page_number(&self) -> u32 {
        self.pages.last().map_or(1, |p| p.page_number + 1)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Find the page index holding a placement.
    #[must_use]
    pub fn page_of(&self, id: &PlacementId) -> Option<usize> {
        self.pages.iter().position(|page| page.placement(id).is_some())
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` if the store holds no pages. Never true for a constructed store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total placements across all pages.
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.pages.iter().map(|p| p.photos.len()).sum()
    }
}

impl Default for PageStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// PHOTOBOOK ATTRIBUTES
// =============================================================================

/// Physical format of the book; fixes the page aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookFormat {
    /// 20×30 cm portrait.
    #[serde(rename = "20x30")]
    Portrait20x30,
    /// 30×30 cm square.
    #[serde(rename = "30x30")]
    Square30x30,
}

impl BookFormat {
    /// Wire name of the format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Portrait20x30 => "20x30",
            Self::Square30x30 => "30x30",
        }
    }

    /// Page width divided by page height.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        match self {
            Self::Portrait20x30 => 20.0 / 30.0,
            Self::Square30x30 => 1.0,
        }
    }

    /// Rendered page size for a given page width in pixels.
    #[must_use]
    pub fn page_size_for_width(self, width_px: f64) -> crate::camera::Size {
        crate::camera::Size::new(width_px, width_px / self.aspect_ratio())
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format string that is neither `20x30` nor `30x30`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown book format: {0} (expected 20x30 or 30x30)")]
pub struct UnknownFormat(pub String);

impl FromStr for BookFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "20x30" => Ok(Self::Portrait20x30),
            "30x30" => Ok(Self::Square30x30),
            other => Err(UnknownFormat(other.to_owned())),
        }
    }
}

/// Lifecycle of a persisted photobook as seen by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotobookStatus {
    #[default]
    Draft,
    Submitted,
}

impl PhotobookStatus {
    #[must_use]
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }
}
