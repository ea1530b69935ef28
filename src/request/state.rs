use crate::mvi::SliceState;

use super::error::ErrorPayload;
use super::id::RequestId;

/// Lifecycle status of a tracked operation. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// What a `pending` transition does to the previous outcome.
///
/// Slices are not uniform here: the add-user form clears every flag when a
/// submission starts, while listing fetches only raise the loading flag and
/// leave the previous error visible until the new outcome arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingPolicy {
    /// Clear the previous error as soon as the request starts.
    #[default]
    ClearOutcome,
    /// Only mark the request as loading; keep the previous error.
    LoadingOnly,
}

/// Status, last payload and last error of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState<T, E = ErrorPayload> {
    status: RequestStatus,
    data: Option<T>,
    error: Option<E>,
    latest_request: Option<RequestId>,
    policy: PendingPolicy,
}

impl<T, E> Default for RequestState<T, E> {
    fn default() -> Self {
        Self::with_policy(PendingPolicy::default())
    }
}

impl<T, E> SliceState for RequestState<T, E>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    E: Clone + PartialEq + Send + Sync + 'static,
{
}

impl<T, E> RequestState<T, E> {
    pub fn with_policy(policy: PendingPolicy) -> Self {
        Self {
            status: RequestStatus::Idle,
            data: None,
            error: None,
            latest_request: None,
            policy,
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn policy(&self) -> PendingPolicy {
        self.policy
    }

    /// Last successful payload. Retained across later pending/failed states
    /// until superseded or reset.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// The request currently in flight, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.latest_request
    }

    pub fn is_idle(&self) -> bool {
        self.status == RequestStatus::Idle
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == RequestStatus::Succeeded
    }

    pub fn is_failure(&self) -> bool {
        self.status == RequestStatus::Failed
    }

    /// Whether a terminal transition for `request_id` would be applied.
    ///
    /// Only the most recently started request may settle the tracker; any
    /// other response is stale.
    pub fn is_latest(&self, request_id: RequestId) -> bool {
        self.latest_request == Some(request_id)
    }

    pub(super) fn begin(&mut self, request_id: RequestId) {
        self.status = RequestStatus::Pending;
        self.latest_request = Some(request_id);
        if self.policy == PendingPolicy::ClearOutcome {
            self.error = None;
        }
    }

    pub(super) fn succeed(&mut self, payload: T) {
        self.status = RequestStatus::Succeeded;
        self.data = Some(payload);
        self.error = None;
        self.latest_request = None;
    }

    pub(super) fn fail(&mut self, error: E) {
        self.status = RequestStatus::Failed;
        self.error = Some(error);
        self.latest_request = None;
    }

    pub(super) fn reset(&mut self) {
        *self = Self::with_policy(self.policy);
    }
}

/// Flat flag view a slice exposes to its views
/// (`isAddUserLoading`, `addUserSuccess`, `addUserFailure`, `addUserFailureMessage`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestFlags {
    pub is_loading: bool,
    pub success: bool,
    pub failure: bool,
    /// Failure messages joined by newlines; empty unless `failure`.
    pub failure_message: String,
}

impl<T> From<&RequestState<T, ErrorPayload>> for RequestFlags {
    fn from(state: &RequestState<T, ErrorPayload>) -> Self {
        // Under `LoadingOnly` a retried request keeps showing the previous
        // failure while it is pending.
        let failure_message = state
            .error()
            .map(|error| error.message.join("\n"))
            .unwrap_or_default();
        Self {
            is_loading: state.is_pending(),
            success: state.is_success(),
            failure: state.error().is_some(),
            failure_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle_and_empty() {
        let state: RequestState<u32> = RequestState::default();
        assert!(state.is_idle());
        assert!(state.data().is_none());
        assert!(state.error().is_none());
        assert!(state.in_flight().is_none());
        assert_eq!(state.policy(), PendingPolicy::ClearOutcome);
    }

    #[test]
    fn flags_of_idle_state_are_all_clear() {
        let state: RequestState<u32> = RequestState::default();
        assert_eq!(RequestFlags::from(&state), RequestFlags::default());
    }
}
