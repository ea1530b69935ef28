//! Errors returned by the REST client.

use thiserror::Error;

use crate::request::ErrorPayload;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Base URL and path did not form a valid URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request produced no response (connect failure, timeout, reset)
    #[error("No response from {method} '{path}': {source}")]
    Transport {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with an error status
    #[error("{method} '{path}' failed with status {status}")]
    Status {
        method: String,
        path: String,
        status: u16,
        body: Vec<u8>,
    },

    /// The backend answered 2xx with a body we could not decode
    #[error("Failed to decode response from '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An operation needed a token the session does not have
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

impl ApiError {
    /// HTTP status of the response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Normalize into the payload request trackers store.
    ///
    /// Structured body message first, then the no-response fallback for
    /// transport failures, then the generic message for everything else.
    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            ApiError::Status { status, body, .. } => ErrorPayload::from_response(*status, body),
            ApiError::Transport { .. } => ErrorPayload::no_response(),
            ApiError::Client(_)
            | ApiError::InvalidUrl { .. }
            | ApiError::Decode { .. }
            | ApiError::MissingCredential(_) => ErrorPayload::unexpected(self.status()),
        }
    }
}
