//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds every photobook in memory, keyed by photobook id, with a gallery
//! index enforcing one photobook per gallery. Nothing is persisted across
//! restarts.

use std::collections::HashMap;
use std::sync::Arc;

use canvas::wire::PhotobookDoc;
use tokio::sync::RwLock;
use uuid::Uuid;

// =============================================================================
// STORE
// =============================================================================

/// Photobooks plus the gallery → photobook index. Both maps change together
/// under one lock.
#[derive(Debug, Default)]
pub struct PhotobookStore {
    pub by_id: HashMap<Uuid, PhotobookDoc>,
    pub by_gallery: HashMap<Uuid, Uuid>,
}

impl PhotobookStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_gallery(&self, gallery_id: Uuid) -> Option<&PhotobookDoc> {
        self.by_gallery
            .get(&gallery_id)
            .and_then(|id| self.by_id.get(id))
    }

    pub fn insert(&mut self, doc: PhotobookDoc) {
        self.by_gallery.insert(doc.gallery_id, doc.id);
        self.by_id.insert(doc.id, doc);
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state. Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone, Default)]
pub struct AppState {
    pub photobooks: Arc<RwLock<PhotobookStore>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { photobooks: Arc::new(RwLock::new(PhotobookStore::new())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
