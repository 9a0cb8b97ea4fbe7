//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the photobook storage endpoints used by the editor's
//! persistence bridge, plus a health probe, under a single Axum router.

pub mod photobooks;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/galleries/{gallery_id}/photobook", get(photobooks::get_gallery_photobook))
        .route("/api/photobooks", post(photobooks::create_photobook))
        .route("/api/photobooks/{id}", put(photobooks::save_photobook))
        .route("/api/photobooks/{id}/submit", post(photobooks::submit_photobook))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
