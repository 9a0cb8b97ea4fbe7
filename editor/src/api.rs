//! Storage seam for photobooks.

use canvas::wire::{CreatePhotobookRequest, PhotobookDoc, SavePhotobookRequest, SubmitPhotobookRequest};
use uuid::Uuid;

use crate::error::BridgeError;

/// Photobook storage operations. Enables mocking in tests.
///
/// Each call is a single request/response with no retry. Last write wins;
/// there is no versioning.
#[async_trait::async_trait]
pub trait PhotobookApi: Send + Sync {
    /// Fetch the photobook for a gallery, or `None` if none was created yet.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] if the request fails or the body is malformed.
    async fn fetch(&self, gallery_id: Uuid) -> Result<Option<PhotobookDoc>, BridgeError>;

    /// Create a draft photobook in the chosen format.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] if storage rejects the request.
    async fn create(&self, request: &CreatePhotobookRequest) -> Result<PhotobookDoc, BridgeError>;

    /// Persist title, notes, and pages of a draft.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] if storage rejects the request, including
    /// when the photobook was already submitted.
    async fn save(&self, request: &SavePhotobookRequest) -> Result<(), BridgeError>;

    /// Persist the final pages and move the photobook to `submitted`.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] if storage rejects the request.
    async fn submit(&self, request: &SubmitPhotobookRequest) -> Result<(), BridgeError>;
}
