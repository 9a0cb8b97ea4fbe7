//! Persistence bridge for the photobook layout editor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `canvas` crate edits pages in memory. This crate moves those pages to
//! and from photobook storage and walks the photobook through its lifecycle:
//! format selection, draft editing, review, and submission.
//!
//! | Module | Role |
//! |--------|------|
//! | [`api`] | `PhotobookApi` trait; the seam mocked in tests |
//! | [`http`] | `reqwest` implementation of the trait |
//! | [`config`] | Environment-derived client configuration |
//! | [`session`] | `EditorSession` lifecycle state machine |
//! | [`error`] | `BridgeError` |

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use api::PhotobookApi;
pub use config::EditorConfig;
pub use error::BridgeError;
pub use http::HttpPhotobookApi;
pub use session::{EditorSession, SessionPhase};
