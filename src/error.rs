// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for talking to the admin backend.

use reqwest::StatusCode;

/// Errors surfaced by [`crate::client::ApiClient`] and the resource services.
///
/// `Clone`: one refresh outcome is handed to every request waiting on it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// No response at all (connect, TLS, timeout, broken body stream).
    #[error("Network error: {0}")]
    Network(String),

    /// 401 that was not recovered by the refresh-and-retry flow.
    #[error("Unauthorized (retried: {retried})")]
    Unauthorized { retried: bool, body: String },

    /// The session could not be refreshed. Local credentials are gone.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Any other non-2xx response, passed through verbatim.
    #[error("HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Upstream { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Message from the backend's `{ "message": ... }` error body, if present.
    pub fn server_message(&self) -> Option<String> {
        let body = match self {
            ApiError::Unauthorized { body, .. } | ApiError::Upstream { body, .. } => body,
            _ => return None,
        };
        serde_json::from_str::<serde_json::Value>(body)
            .ok()?
            .get("message")?
            .as_str()
            .map(str::to_string)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Errors from the durable credential store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type alias for API calls
pub type Result<T> = std::result::Result<T, ApiError>;
