//! JSON shapes exchanged with photobook storage.
//!
//! Field names are camelCase on the wire. Placements travel exactly as
//! [`Placement`] serializes; pages gain a `layoutType` tag when sent for
//! save or submit.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::doc::{BookFormat, Page, PhotobookStatus, Placement};

/// Response body wrapping an optional photobook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotobookEnvelope {
    #[serde(default)]
    pub photobook: Option<PhotobookDoc>,
}

/// A persisted photobook as returned by storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotobookDoc {
    pub id: Uuid,
    pub gallery_id: Uuid,
    pub format: BookFormat,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: PhotobookStatus,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// Body of the create call made when a format is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePhotobookRequest {
    pub gallery_id: Uuid,
    pub format: BookFormat,
    pub title: String,
}

/// Page layout strategy. Only freeform placement is produced by this editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    Freeform,
}

/// One page as sent on save/submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    pub page_number: u32,
    #[serde(default)]
    pub layout_type: LayoutType,
    pub photos: Vec<Placement>,
    pub background_color: String,
}

impl From<&Page> for PagePayload {
    fn from(page: &Page) -> Self {
        Self {
            page_number: page.page_number,
            layout_type: LayoutType::Freeform,
            photos: page.photos.clone(),
            background_color: page.background_color.clone(),
        }
    }
}

impl From<PagePayload> for Page {
    fn from(payload: PagePayload) -> Self {
        Self {
            id: None,
            page_number: payload.page_number,
            photos: payload.photos,
            background_color: payload.background_color,
        }
    }
}

/// Body of the save call; also the body of submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePhotobookRequest {
    pub photobook_id: Uuid,
    pub title: String,
    pub notes: String,
    pub pages: Vec<PagePayload>,
}

impl SavePhotobookRequest {
    /// Build a request from the editor's pages.
    #[must_use]
    pub fn from_pages(photobook_id: Uuid, title: &str, notes: &str, pages: &[Page]) -> Self {
        Self {
            photobook_id,
            title: title.to_owned(),
            notes: notes.to_owned(),
            pages: pages.iter().map(PagePayload::from).collect(),
        }
    }
}

/// Submit shares the save body shape.
pub type SubmitPhotobookRequest = SavePhotobookRequest;

/// Error body returned by storage for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
