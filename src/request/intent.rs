use crate::mvi::Intent;

use super::error::ErrorPayload;
use super::id::RequestId;

/// Lifecycle transitions for one tracked operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestIntent<T, E = ErrorPayload> {
    /// A request was dispatched and is now the latest for this tracker.
    Pending { request_id: RequestId },
    /// The request resolved with a payload.
    Fulfilled { request_id: RequestId, payload: T },
    /// The request failed with a normalized error.
    Rejected { request_id: RequestId, error: E },
    /// Return to idle (dialog closed, view unmounted).
    Reset,
}

impl<T, E> RequestIntent<T, E> {
    /// The request this transition belongs to, if any.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            RequestIntent::Pending { request_id }
            | RequestIntent::Fulfilled { request_id, .. }
            | RequestIntent::Rejected { request_id, .. } => Some(*request_id),
            RequestIntent::Reset => None,
        }
    }

    /// Transform the fulfilled payload, keeping every other transition as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestIntent<U, E> {
        match self {
            RequestIntent::Pending { request_id } => RequestIntent::Pending { request_id },
            RequestIntent::Fulfilled {
                request_id,
                payload,
            } => RequestIntent::Fulfilled {
                request_id,
                payload: f(payload),
            },
            RequestIntent::Rejected { request_id, error } => {
                RequestIntent::Rejected { request_id, error }
            }
            RequestIntent::Reset => RequestIntent::Reset,
        }
    }
}

impl<T, E> Intent for RequestIntent<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
}
