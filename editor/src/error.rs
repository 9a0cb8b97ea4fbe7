//! Errors produced by the persistence bridge.

use crate::session::SessionPhase;

/// Errors produced by storage calls and lifecycle transitions.
///
/// Transient and permanent failures are not distinguished: every variant
/// ends the attempted action and waits for the user to retry.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request did not complete.
    #[error("request failed: {0}")]
    Request(String),

    /// Storage answered with a non-success status.
    #[error("storage rejected request: status {status}{}", code_suffix(.code.as_deref()))]
    Status { status: u16, code: Option<String>, body: String },

    /// The response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// Storage answered successfully but without a photobook.
    #[error("storage returned no photobook")]
    MissingPhotobook,

    /// The action is not available in the session's current phase.
    #[error("cannot {action} while {phase}")]
    InvalidPhase { action: &'static str, phase: SessionPhase },
}

fn code_suffix(code: Option<&str>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

impl BridgeError {
    /// Stable machine-readable code for logs and the CLI.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Request(_) => "E_REQUEST",
            Self::Status { .. } => "E_STATUS",
            Self::Parse(_) => "E_PARSE",
            Self::MissingPhotobook => "E_MISSING_PHOTOBOOK",
            Self::InvalidPhase { .. } => "E_INVALID_PHASE",
        }
    }

    /// Whether storage refused the change because the photobook is no longer a draft.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Status { status: 409, code: Some(code), .. } if code == "E_PHOTOBOOK_LOCKED")
    }
}
