//! HTTP client for photobook storage.
//!
//! Thin `reqwest` wrapper over four endpoints. URL building and body
//! parsing are free functions so they can be tested without a server.

use std::time::Duration;

use canvas::wire::{
    CreatePhotobookRequest, ErrorEnvelope, PhotobookDoc, PhotobookEnvelope, SavePhotobookRequest,
    SubmitPhotobookRequest,
};
use uuid::Uuid;

use crate::api::PhotobookApi;
use crate::config::EditorConfig;
use crate::error::BridgeError;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpPhotobookApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPhotobookApi {
    /// # Errors
    ///
    /// Returns [`BridgeError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(config: &EditorConfig) -> Result<Self, BridgeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BridgeError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and return the body of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BridgeError> {
        let response = request
            .send()
            .await
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BridgeError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), text));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl PhotobookApi for HttpPhotobookApi {
    async fn fetch(&self, gallery_id: Uuid) -> Result<Option<PhotobookDoc>, BridgeError> {
        let text = self
            .send(self.http.get(gallery_photobook_url(&self.base_url, gallery_id)))
            .await?;
        parse_envelope(&text)
    }

    async fn create(&self, request: &CreatePhotobookRequest) -> Result<PhotobookDoc, BridgeError> {
        let text = self
            .send(self.http.post(photobooks_url(&self.base_url)).json(request))
            .await?;
        parse_envelope(&text)?.ok_or(BridgeError::MissingPhotobook)
    }

    async fn save(&self, request: &SavePhotobookRequest) -> Result<(), BridgeError> {
        self.send(
            self.http
                .put(photobook_url(&self.base_url, request.photobook_id))
                .json(request),
        )
        .await?;
        Ok(())
    }

    async fn submit(&self, request: &SubmitPhotobookRequest) -> Result<(), BridgeError> {
        self.send(
            self.http
                .post(submit_url(&self.base_url, request.photobook_id))
                .json(request),
        )
        .await?;
        Ok(())
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

fn gallery_photobook_url(base: &str, gallery_id: Uuid) -> String {
    format!("{base}/api/galleries/{gallery_id}/photobook")
}

fn photobooks_url(base: &str) -> String {
    format!("{base}/api/photobooks")
}

fn photobook_url(base: &str, photobook_id: Uuid) -> String {
    format!("{base}/api/photobooks/{photobook_id}")
}

fn submit_url(base: &str, photobook_id: Uuid) -> String {
    format!("{base}/api/photobooks/{photobook_id}/submit")
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_envelope(json: &str) -> Result<Option<PhotobookDoc>, BridgeError> {
    let envelope: PhotobookEnvelope = serde_json::from_str(json).map_err(|e| BridgeError::Parse(e.to_string()))?;
    Ok(envelope.photobook)
}

/// Map a non-2xx response to an error, lifting the storage error code when the body carries one.
fn status_error(status: u16, body: String) -> BridgeError {
    let code = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .map(|envelope| envelope.error.code);
    BridgeError::Status { status, code, body }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
