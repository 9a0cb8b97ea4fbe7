//! Bridge configuration parsed from environment variables.

use crate::error::BridgeError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl RequestTimeouts {
    /// Timeouts from `PHOTOBOOK_REQUEST_TIMEOUT_SECS` and
    /// `PHOTOBOOK_CONNECT_TIMEOUT_SECS`; unset or malformed values fall back
    /// to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            request_secs: env_parse_u64("PHOTOBOOK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("PHOTOBOOK_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl Default for RequestTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Storage origin without a trailing slash, e.g. `http://127.0.0.1:3000`.
    pub base_url: String,
    pub timeouts: RequestTimeouts,
}

impl EditorConfig {
    /// Config for an explicit base URL with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigParse`] if the URL is not http(s).
    pub fn new(base_url: &str) -> Result<Self, BridgeError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: RequestTimeouts::default() })
    }

    /// Config for an explicit base URL with timeouts taken from the
    /// environment. `PHOTOBOOK_API_BASE_URL` is not read.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigParse`] if the URL is not http(s).
    pub fn with_env_timeouts(base_url: &str) -> Result<Self, BridgeError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, timeouts: RequestTimeouts::from_env() })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PHOTOBOOK_API_BASE_URL`: default `http://127.0.0.1:3000`
    /// - `PHOTOBOOK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `PHOTOBOOK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigParse`] if the base URL is not http(s).
    pub fn from_env() -> Result<Self, BridgeError> {
        let base_url = std::env::var("PHOTOBOOK_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_env_timeouts(&base_url)
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, BridgeError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(BridgeError::ConfigParse(format!("base URL must be http(s): {raw}")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
