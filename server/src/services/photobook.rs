//! Photobook service: create, save, and submit against the in-memory store.
//!
//! DESIGN
//! ======
//! One photobook per gallery. A new photobook starts as a draft with one
//! empty spread. Saves replace title, notes, and the full page list; there is
//! no versioning and the last write wins. Submit is a save that also moves
//! the status to `submitted`, after which every write is refused.
//!
//! Pages carry a storage id. Ids are assigned on create and kept across saves
//! for every page number that already existed; new page numbers get new ids.
//!
//! ERROR HANDLING
//! ==============
//! Page lists are validated before anything is written, so a rejected save
//! leaves the stored photobook untouched.

use std::collections::HashSet;

use canvas::consts::{MIN_PLACEMENT_SIZE, PAGE_EXTENT, PAGES_PER_SPREAD};
use canvas::doc::{Page, PhotobookStatus, Placement};
use canvas::wire::{CreatePhotobookRequest, PagePayload, PhotobookDoc, SavePhotobookRequest};
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

/// Slack for float noise when checking stored geometry.
const GEOMETRY_TOLERANCE: f64 = 1e-6;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PhotobookError {
    #[error("photobook not found: {0}")]
    NotFound(Uuid),
    #[error("gallery {0} already has a photobook")]
    AlreadyExists(Uuid),
    #[error("photobook {0} is already submitted")]
    Locked(Uuid),
    #[error("photobook id in body ({body}) does not match path ({path})")]
    IdMismatch { path: Uuid, body: Uuid },
    #[error("invalid pages: {0}")]
    InvalidPages(String),
}

impl PhotobookError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_PHOTOBOOK_NOT_FOUND",
            Self::AlreadyExists(_) => "E_PHOTOBOOK_EXISTS",
            Self::Locked(_) => "E_PHOTOBOOK_LOCKED",
            Self::IdMismatch { .. } => "E_ID_MISMATCH",
            Self::InvalidPages(_) => "E_INVALID_PAGES",
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Fetch the photobook for a gallery, if one was created.
pub async fn get_for_gallery(state: &AppState, gallery_id: Uuid) -> Option<PhotobookDoc> {
    state
        .photobooks
        .read()
        .await
        .for_gallery(gallery_id)
        .cloned()
}

/// Create a draft photobook with one empty spread.
///
/// # Errors
///
/// Returns [`PhotobookError::AlreadyExists`] if the gallery already has one.
pub async fn create_photobook(state: &AppState, request: CreatePhotobookRequest) -> Result<PhotobookDoc, PhotobookError> {
    let mut store = state.photobooks.write().await;
    if store.by_gallery.contains_key(&request.gallery_id) {
        return Err(PhotobookError::AlreadyExists(request.gallery_id));
    }

    let doc = PhotobookDoc {
        id: Uuid::new_v4(),
        gallery_id: request.gallery_id,
        format: request.format,
        title: request.title,
        notes: String::new(),
        status: PhotobookStatus::Draft,
        pages: assign_page_ids(vec![Page::new(1), Page::new(2)], &[]),
    };
    store.insert(doc.clone());

    info!(photobook_id = %doc.id, gallery_id = %doc.gallery_id, format = %doc.format, "photobook created");
    Ok(doc)
}

/// Replace title, notes, and pages of a draft.
///
/// # Errors
///
/// Returns an error if the id is unknown or mismatched, the photobook is
/// submitted, or the pages fail validation.
pub async fn save_photobook(
    state: &AppState,
    photobook_id: Uuid,
    request: SavePhotobookRequest,
) -> Result<PhotobookDoc, PhotobookError> {
    let doc = write_photobook(state, photobook_id, request, PhotobookStatus::Draft).await?;
    info!(%photobook_id, pages = doc.pages.len(), "photobook saved");
    Ok(doc)
}

/// Save the final pages and mark the photobook submitted.
///
/// # Errors
///
/// Same conditions as [`save_photobook`].
pub async fn submit_photobook(
    state: &AppState,
    photobook_id: Uuid,
    request: SavePhotobookRequest,
) -> Result<PhotobookDoc, PhotobookError> {
    let doc = write_photobook(state, photobook_id, request, PhotobookStatus::Submitted).await?;
    info!(%photobook_id, pages = doc.pages.len(), "photobook submitted");
    Ok(doc)
}

async fn write_photobook(
    state: &AppState,
    photobook_id: Uuid,
    request: SavePhotobookRequest,
    status: PhotobookStatus,
) -> Result<PhotobookDoc, PhotobookError> {
    if request.photobook_id != photobook_id {
        return Err(PhotobookError::IdMismatch { path: photobook_id, body: request.photobook_id });
    }

    let mut store = state.photobooks.write().await;
    let doc = store
        .by_id
        .get_mut(&photobook_id)
        .ok_or(PhotobookError::NotFound(photobook_id))?;
    if !doc.status.is_editable() {
        return Err(PhotobookError::Locked(photobook_id));
    }
    validate_pages(&request.pages)?;

    let mut pages: Vec<Page> = request.pages.into_iter().map(Page::from).collect();
    pages.sort_by_key(|p| p.page_number);

    doc.title = request.title;
    doc.notes = request.notes;
    doc.pages = assign_page_ids(pages, &doc.pages);
    doc.status = status;
    Ok(doc.clone())
}

/// Give every page a storage id, reusing the id `previous` holds for the
/// same page number.
pub(crate) fn assign_page_ids(mut pages: Vec<Page>, previous: &[Page]) -> Vec<Page> {
    for page in &mut pages {
        let known = previous
            .iter()
            .find(|p| p.page_number == page.page_number)
            .and_then(|p| p.id.clone());
        page.id = Some(known.unwrap_or_else(|| Uuid::new_v4().to_string()));
    }
    pages
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Check that pages form whole spreads with unique numbers and that every
/// placement lies within its page.
///
/// # Errors
///
/// Returns [`PhotobookError::InvalidPages`] describing the first problem found.
pub fn validate_pages(pages: &[PagePayload]) -> Result<(), PhotobookError> {
    if pages.is_empty() || pages.len() % PAGES_PER_SPREAD != 0 {
        return Err(PhotobookError::InvalidPages(format!(
            "page count must be a positive multiple of {PAGES_PER_SPREAD}, got {}",
            pages.len()
        )));
    }

    let mut numbers = HashSet::new();
    for page in pages {
        if !numbers.insert(page.page_number) {
            return Err(PhotobookError::InvalidPages(format!("duplicate page number {}", page.page_number)));
        }
        let mut ids = HashSet::new();
        for placement in &page.photos {
            if !ids.insert(placement.id) {
                return Err(PhotobookError::InvalidPages(format!(
                    "duplicate placement {} on page {}",
                    placement.id, page.page_number
                )));
            }
            check_geometry(placement).map_err(|reason| {
                PhotobookError::InvalidPages(format!(
                    "placement {} on page {}: {reason}",
                    placement.id, page.page_number
                ))
            })?;
        }
    }
    Ok(())
}

fn check_geometry(p: &Placement) -> Result<(), &'static str> {
    let values = [p.x, p.y, p.width, p.height];
    if values.iter().any(|v| !v.is_finite()) {
        return Err("non-finite geometry");
    }
    let size_ok = |v: f64| (MIN_PLACEMENT_SIZE - GEOMETRY_TOLERANCE..=PAGE_EXTENT + GEOMETRY_TOLERANCE).contains(&v);
    if !size_ok(p.width) || !size_ok(p.height) {
        return Err("size out of range");
    }
    if p.x < -GEOMETRY_TOLERANCE || p.x + p.width > PAGE_EXTENT + GEOMETRY_TOLERANCE {
        return Err("extends past horizontal page edge");
    }
    if p.y < -GEOMETRY_TOLERANCE || p.y + p.height > PAGE_EXTENT + GEOMETRY_TOLERANCE {
        return Err("extends past vertical page edge");
    }
    Ok(())
}

#[cfg(test)]
#[path = "photobook_test.rs"]
mod tests;
