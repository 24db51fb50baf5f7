//! Client Error Types
//!
//! Every failure is terminal for the request that produced it; nothing
//! in this crate retries.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by API calls and session handling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Transport failure (connection refused, DNS, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Server rejected the request and said why
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Missing, expired or rejected credentials
    #[error("Not authorized")]
    Unauthorized,

    /// Response did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Stored session could not be read back
    #[error("Invalid stored session: {0}")]
    Session(String),

    /// Client storage could not be written
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Error body shapes the backend is known to produce
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ClientError {
    /// Build an error from a non-success status and its raw body.
    ///
    /// A `message` (or `error`) field wins; otherwise 401/403 map to
    /// [`ClientError::Unauthorized`] and anything else keeps the raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        if let Some(message) = parsed.message.or(parsed.error).filter(|m| !m.is_empty()) {
            return ClientError::Api { status, message };
        }

        if status == 401 || status == 403 {
            return ClientError::Unauthorized;
        }

        let message = if body.trim().is_empty() {
            format!("Request failed with status {}", status)
        } else {
            body.trim().to_string()
        };

        ClientError::Api { status, message }
    }

    /// Whether the caller should drop its session
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::Session(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
