//! Photobook storage routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::wire::{CreatePhotobookRequest, ErrorBody, ErrorEnvelope, PhotobookEnvelope, SavePhotobookRequest};
use tracing::warn;
use uuid::Uuid;

use crate::services::photobook::{self, PhotobookError};
use crate::state::AppState;

pub type ApiError = (StatusCode, Json<ErrorEnvelope>);

/// `GET /api/galleries/:gallery_id/photobook`: the gallery's photobook, or `null`.
pub async fn get_gallery_photobook(
    State(state): State<AppState>,
    Path(gallery_id): Path<Uuid>,
) -> Json<PhotobookEnvelope> {
    Json(PhotobookEnvelope { photobook: photobook::get_for_gallery(&state, gallery_id).await })
}

/// `POST /api/photobooks`: create a draft for a gallery.
pub async fn create_photobook(
    State(state): State<AppState>,
    Json(body): Json<CreatePhotobookRequest>,
) -> Result<(StatusCode, Json<PhotobookEnvelope>), ApiError> {
    let doc = photobook::create_photobook(&state, body)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(PhotobookEnvelope { photobook: Some(doc) })))
}

/// `PUT /api/photobooks/:id`: save a draft.
pub async fn save_photobook(
    State(state): State<AppState>,
    Path(photobook_id): Path<Uuid>,
    Json(body): Json<SavePhotobookRequest>,
) -> Result<Json<PhotobookEnvelope>, ApiError> {
    let doc = photobook::save_photobook(&state, photobook_id, body)
        .await
        .map_err(error_response)?;
    Ok(Json(PhotobookEnvelope { photobook: Some(doc) }))
}

/// `POST /api/photobooks/:id/submit`: save the final pages and lock.
pub async fn submit_photobook(
    State(state): State<AppState>,
    Path(photobook_id): Path<Uuid>,
    Json(body): Json<SavePhotobookRequest>,
) -> Result<Json<PhotobookEnvelope>, ApiError> {
    let doc = photobook::submit_photobook(&state, photobook_id, body)
        .await
        .map_err(error_response)?;
    Ok(Json(PhotobookEnvelope { photobook: Some(doc) }))
}

pub(crate) fn photobook_error_to_status(err: &PhotobookError) -> StatusCode {
    match err {
        PhotobookError::NotFound(_) => StatusCode::NOT_FOUND,
        PhotobookError::AlreadyExists(_) | PhotobookError::Locked(_) => StatusCode::CONFLICT,
        PhotobookError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
        PhotobookError::InvalidPages(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_response(err: PhotobookError) -> ApiError {
    let status = photobook_error_to_status(&err);
    warn!(error = %err, code = err.error_code(), status = status.as_u16(), "photobook request rejected");
    let body = ErrorEnvelope { error: ErrorBody { code: err.error_code().to_owned(), message: err.to_string() } };
    (status, Json(body))
}

#[cfg(test)]
#[path = "photobooks_test.rs"]
mod tests;
