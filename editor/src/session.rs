//! Editor session: one gallery's photobook from format choice to submission.
//!
//! DESIGN
//! ======
//! The session owns the canvas engine and the photobook metadata, and is the
//! only place that talks to storage. Phases:
//!
//! ```text
//! Unselected --select_format--> Creating --ok--> Draft <--review/back_to_draft--> Review --submit--> Submitted
//!            <------------------------- err
//! ```
//!
//! `load` skips straight to `Draft` (or `Submitted`) when storage already has
//! a photobook for the gallery.
//!
//! `Creating` is only observable from outside when a `select_format` future
//! was dropped before the create call resolved. Storage may or may not hold
//! the new photobook at that point, so both `load` and `select_format` accept
//! it as a starting phase.
//!
//! ERROR HANDLING
//! ==============
//! Every storage failure leaves local state untouched, is logged at `warn`,
//! and is kept as `last_error` for the UI to show. Nothing is retried.

use std::fmt;
use std::sync::Arc;

use canvas::doc::{BookFormat, Page, PhotobookStatus};
use canvas::engine::EngineCore;
use canvas::wire::{CreatePhotobookRequest, PhotobookDoc, SavePhotobookRequest};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::PhotobookApi;
use crate::error::BridgeError;

// =============================================================================
// PHASE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No photobook exists yet; the format picker is shown.
    Unselected,
    /// A create call was started and has not resolved.
    Creating,
    Draft,
    /// Read-only preview with title and notes still editable.
    Review,
    Submitted,
}

impl SessionPhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unselected => "unselected",
            Self::Creating => "creating",
            Self::Draft => "draft",
            Self::Review => "review",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SESSION
// =============================================================================

pub struct EditorSession {
    api: Arc<dyn PhotobookApi>,
    gallery_id: Uuid,
    phase: SessionPhase,
    photobook_id: Option<Uuid>,
    format: Option<BookFormat>,
    title: String,
    notes: String,
    canvas: EngineCore,
    last_error: Option<String>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("gallery_id", &self.gallery_id)
            .field("phase", &self.phase)
            .field("photobook_id", &self.photobook_id)
            .field("format", &self.format)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    #[must_use]
    pub fn new(api: Arc<dyn PhotobookApi>, gallery_id: Uuid) -> Self {
        Self {
            api,
            gallery_id,
            phase: SessionPhase::Unselected,
            photobook_id: None,
            format: None,
            title: String::new(),
            notes: String::new(),
            canvas: EngineCore::new(),
            last_error: None,
        }
    }

    // --- Lifecycle ---

    /// Fetch the gallery's photobook and enter the matching phase.
    ///
    /// A draft opens in `Draft`, a submitted book opens locked in
    /// `Submitted`, and no book leaves the session `Unselected`.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the fetch fails. An abandoned create
    /// then drops back to `Unselected`.
    pub async fn load(&mut self) -> Result<(), BridgeError> {
        match self.api.fetch(self.gallery_id).await {
            Ok(Some(doc)) => {
                self.apply_doc(doc);
                Ok(())
            }
            Ok(None) => {
                info!(gallery_id = %self.gallery_id, "no photobook yet");
                self.reset();
                Ok(())
            }
            Err(e) => {
                if self.phase == SessionPhase::Creating {
                    self.phase = SessionPhase::Unselected;
                }
                Err(self.fail("load", e))
            }
        }
    }

    /// Create the photobook in the chosen format and open it as a draft.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] unless the session is
    /// `Unselected` or left `Creating` by an abandoned call, or the storage
    /// error if the create call fails. On failure the session returns to
    /// `Unselected`.
    pub async fn select_format(&mut self, format: BookFormat, title: &str) -> Result<(), BridgeError> {
        if !matches!(self.phase, SessionPhase::Unselected | SessionPhase::Creating) {
            return Err(self.reject("select a format"));
        }
        self.phase = SessionPhase::Creating;
        let request = CreatePhotobookRequest { gallery_id: self.gallery_id, format, title: title.to_owned() };
        match self.api.create(&request).await {
            Ok(doc) => {
                info!(gallery_id = %self.gallery_id, photobook_id = %doc.id, %format, "photobook created");
                self.apply_doc(doc);
                Ok(())
            }
            Err(e) => {
                self.phase = SessionPhase::Unselected;
                Err(self.fail("create photobook", e))
            }
        }
    }

    /// Persist title, notes, and all pages. Never changes phase.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] outside `Draft` and `Review`, or
    /// the storage error if the save is rejected.
    pub async fn save(&mut self) -> Result<(), BridgeError> {
        let request = self.snapshot("save", &[SessionPhase::Draft, SessionPhase::Review])?;
        match self.api.save(&request).await {
            Ok(()) => {
                info!(photobook_id = %request.photobook_id, pages = request.pages.len(), "photobook saved");
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("save", e)),
        }
    }

    /// Enter the read-only preview.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] outside `Draft`.
    pub fn review(&mut self) -> Result<(), BridgeError> {
        if self.phase != SessionPhase::Draft {
            return Err(self.reject("review"));
        }
        self.canvas.clear_selection();
        self.phase = SessionPhase::Review;
        Ok(())
    }

    /// Leave the preview and resume editing.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] outside `Review`.
    pub fn back_to_draft(&mut self) -> Result<(), BridgeError> {
        if self.phase != SessionPhase::Review {
            return Err(self.reject("return to draft"));
        }
        self.phase = SessionPhase::Draft;
        Ok(())
    }

    /// Persist the final pages and lock the photobook.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] outside `Review`, or the storage
    /// error if the submit is rejected; the session then stays in `Review`.
    pub async fn submit(&mut self) -> Result<(), BridgeError> {
        let request = self.snapshot("submit", &[SessionPhase::Review])?;
        match self.api.submit(&request).await {
            Ok(()) => {
                info!(photobook_id = %request.photobook_id, "photobook submitted");
                self.phase = SessionPhase::Submitted;
                self.canvas.lock();
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("submit", e)),
        }
    }

    // --- Metadata ---

    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] outside `Draft` and `Review`.
    pub fn set_title(&mut self, title: &str) -> Result<(), BridgeError> {
        self.require_editable_metadata("edit the title")?;
        title.clone_into(&mut self.title);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidPhase`] outside `Draft` and `Review`.
    pub fn set_notes(&mut self, notes: &str) -> Result<(), BridgeError> {
        self.require_editable_metadata("edit the notes")?;
        notes.clone_into(&mut self.notes);
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn gallery_id(&self) -> Uuid {
        self.gallery_id
    }

    #[must_use]
    pub fn photobook_id(&self) -> Option<Uuid> {
        self.photobook_id
    }

    #[must_use]
    pub fn format(&self) -> Option<BookFormat> {
        self.format
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        self.canvas.pages.pages()
    }

    #[must_use]
    pub fn canvas(&self) -> &EngineCore {
        &self.canvas
    }

    /// Mutable engine access, only while drafting.
    pub fn canvas_mut(&mut self) -> Option<&mut EngineCore> {
        (self.phase == SessionPhase::Draft).then_some(&mut self.canvas)
    }

    /// Text of the most recent failure, for the user-visible alert.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// The session's state in storage shape.
    #[must_use]
    pub fn to_doc(&self) -> Option<PhotobookDoc> {
        let status = if self.phase == SessionPhase::Submitted {
            PhotobookStatus::Submitted
        } else {
            PhotobookStatus::Draft
        };
        Some(PhotobookDoc {
            id: self.photobook_id?,
            gallery_id: self.gallery_id,
            format: self.format?,
            title: self.title.clone(),
            notes: self.notes.clone(),
            status,
            pages: self.pages().to_vec(),
        })
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn apply_doc(&mut self, doc: PhotobookDoc) {
        let page_size = self.canvas.page_size;
        let mut canvas = EngineCore::new();
        canvas.page_size = page_size;
        canvas.load_pages(doc.pages);

        self.phase = if doc.status.is_editable() {
            SessionPhase::Draft
        } else {
            canvas.lock();
            SessionPhase::Submitted
        };
        self.canvas = canvas;
        self.photobook_id = Some(doc.id);
        self.format = Some(doc.format);
        self.title = doc.title;
        self.notes = doc.notes;
        self.last_error = None;
    }

    fn reset(&mut self) {
        let page_size = self.canvas.page_size;
        self.phase = SessionPhase::Unselected;
        self.photobook_id = None;
        self.format = None;
        self.title.clear();
        self.notes.clear();
        self.canvas = EngineCore::new();
        self.canvas.page_size = page_size;
        self.last_error = None;
    }

    fn snapshot(&mut self, action: &'static str, allowed: &[SessionPhase]) -> Result<SavePhotobookRequest, BridgeError> {
        if !allowed.contains(&self.phase) {
            return Err(self.reject(action));
        }
        let Some(photobook_id) = self.photobook_id else {
            return Err(self.reject(action));
        };
        Ok(SavePhotobookRequest::from_pages(photobook_id, &self.title, &self.notes, self.canvas.pages.pages()))
    }

    fn require_editable_metadata(&mut self, action: &'static str) -> Result<(), BridgeError> {
        if matches!(self.phase, SessionPhase::Draft | SessionPhase::Review) {
            Ok(())
        } else {
            Err(self.reject(action))
        }
    }

    fn reject(&mut self, action: &'static str) -> BridgeError {
        let err = BridgeError::InvalidPhase { action, phase: self.phase };
        self.last_error = Some(err.to_string());
        err
    }

    fn fail(&mut self, action: &'static str, err: BridgeError) -> BridgeError {
        warn!(
            gallery_id = %self.gallery_id,
            photobook_id = ?self.photobook_id,
            error = %err,
            code = err.error_code(),
            "{action} failed"
        );
        self.last_error = Some(format!("{action} failed: {err}"));
        err
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
