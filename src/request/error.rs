//! Normalized failure payload stored by request trackers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback used when the request never produced a response.
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please try again later.";

/// Fallback used when a response arrived but carried no usable message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error occurred.";

/// Failure shape every tracker stores: `{message: string[], statusCode?}`.
///
/// Scalar messages from the backend are wrapped into a single-element list so
/// views can always render one line per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: Vec<String>,
    #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Error body as the backend sends it. `message` may be a string or a list.
#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    message: Option<RawMessage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMessage {
    One(String),
    Many(Vec<serde_json::Value>),
}

impl RawMessage {
    fn into_lines(self) -> Vec<String> {
        match self {
            RawMessage::One(line) => vec![line],
            RawMessage::Many(values) => values
                .into_iter()
                .map(|value| match value {
                    serde_json::Value::String(line) => line,
                    other => other.to_string(),
                })
                .collect(),
        }
    }
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            message: vec![message.into()],
            status_code,
        }
    }

    /// The request failed before any response was received.
    pub fn no_response() -> Self {
        Self::new(NO_RESPONSE_MESSAGE, None)
    }

    /// A response (or local failure) carried nothing we can show.
    pub fn unexpected(status_code: Option<u16>) -> Self {
        Self::new(UNEXPECTED_ERROR_MESSAGE, status_code)
    }

    /// Build a payload from an error response.
    ///
    /// Prefers the structured `message` in the body; falls back to the
    /// generic message when the body is missing, not JSON, or has no
    /// non-empty message. The status code is always the HTTP status.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let Ok(raw) = serde_json::from_slice::<RawErrorBody>(body) else {
            return Self::unexpected(Some(status));
        };

        let status_code = Some(status);
        let lines: Vec<String> = raw
            .message
            .map(RawMessage::into_lines)
            .unwrap_or_default()
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return Self::unexpected(status_code);
        }

        Self {
            message: lines,
            status_code,
        }
    }

    /// One `"• message"` line per message, in backend order.
    pub fn bullet_lines(&self) -> Vec<String> {
        self.message.iter().map(|line| format!("• {line}")).collect()
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.join("; "))?;
        if let Some(code) = self.status_code {
            write!(f, " ({code})")?;
        }
        Ok(())
    }
}
