//! Reducer for request tracker transitions.

use std::marker::PhantomData;

use crate::mvi::Reducer;

use super::intent::RequestIntent;
use super::state::RequestState;

/// Applies [`RequestIntent`] transitions to a [`RequestState`].
///
/// Terminal transitions (`Fulfilled`, `Rejected`) are only applied when they
/// carry the id of the latest `Pending`; anything else is a stale response
/// and leaves the state untouched. A `Reset` also invalidates the request in
/// flight, so a late answer cannot resurrect a dismissed banner.
pub struct RequestReducer<T, E>(PhantomData<fn() -> (T, E)>);

impl<T, E> Reducer for RequestReducer<T, E>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    E: Clone + PartialEq + Send + Sync + 'static,
{
    type State = RequestState<T, E>;
    type Intent = RequestIntent<T, E>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            RequestIntent::Pending { request_id } => state.begin(request_id),
            RequestIntent::Fulfilled {
                request_id,
                payload,
            } => {
                if state.is_latest(request_id) {
                    state.succeed(payload);
                } else {
                    tracing::debug!(%request_id, "Discarding stale fulfilled response");
                }
            }
            RequestIntent::Rejected { request_id, error } => {
                if state.is_latest(request_id) {
                    state.fail(error);
                } else {
                    tracing::debug!(%request_id, "Discarding stale rejected response");
                }
            }
            RequestIntent::Reset => state.reset(),
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ErrorPayload, PendingPolicy, RequestFlags, RequestId, RequestStatus};

    type Tracker = RequestReducer<String, ErrorPayload>;

    fn id(raw: u64) -> RequestId {
        RequestId::from_raw(raw)
    }

    fn pending(raw: u64) -> RequestIntent<String> {
        RequestIntent::Pending {
            request_id: id(raw),
        }
    }

    fn fulfilled(raw: u64, payload: &str) -> RequestIntent<String> {
        RequestIntent::Fulfilled {
            request_id: id(raw),
            payload: payload.to_string(),
        }
    }

    fn rejected(raw: u64, message: &str) -> RequestIntent<String> {
        RequestIntent::Rejected {
            request_id: id(raw),
            error: ErrorPayload::new(message, Some(400)),
        }
    }

    #[test]
    fn begin_then_succeed_stores_payload() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        assert_eq!(state.status(), RequestStatus::Pending);

        let state = Tracker::reduce(state, fulfilled(1, "alice"));
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.data().map(String::as_str), Some("alice"));
        assert!(state.error().is_none());
        assert!(state.in_flight().is_none());
    }

    #[test]
    fn begin_then_fail_clears_success_flag() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        let state = Tracker::reduce(state, fulfilled(1, "alice"));
        let state = Tracker::reduce(state, pending(2));
        let state = Tracker::reduce(state, rejected(2, "boom"));

        assert_eq!(state.status(), RequestStatus::Failed);
        assert_eq!(state.error(), Some(&ErrorPayload::new("boom", Some(400))));
        let flags = RequestFlags::from(&state);
        assert!(!flags.success);
        assert!(flags.failure);
        assert_eq!(flags.failure_message, "boom");
    }

    #[test]
    fn previous_payload_survives_failure() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        let state = Tracker::reduce(state, fulfilled(1, "alice"));
        let state = Tracker::reduce(state, pending(2));
        let state = Tracker::reduce(state, rejected(2, "boom"));
        assert_eq!(state.data().map(String::as_str), Some("alice"));
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        let state = Tracker::reduce(state, rejected(1, "boom"));

        let once = Tracker::reduce(state, RequestIntent::Reset);
        let twice = Tracker::reduce(once.clone(), RequestIntent::Reset);
        assert_eq!(once, twice);
        assert!(twice.is_idle());
        assert!(twice.error().is_none());
    }

    #[test]
    fn reset_keeps_pending_policy() {
        let state: RequestState<String> = RequestState::with_policy(PendingPolicy::LoadingOnly);
        let state = Tracker::reduce(state, RequestIntent::Reset);
        assert_eq!(state.policy(), PendingPolicy::LoadingOnly);
    }

    #[test]
    fn clear_outcome_pending_drops_previous_error() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        let state = Tracker::reduce(state, rejected(1, "boom"));
        let state = Tracker::reduce(state, pending(2));

        assert!(state.is_pending());
        assert!(state.error().is_none());
        assert!(!RequestFlags::from(&state).failure);
    }

    #[test]
    fn loading_only_pending_keeps_previous_error() {
        let state = RequestState::with_policy(PendingPolicy::LoadingOnly);
        let state = Tracker::reduce(state, pending(1));
        let state = Tracker::reduce(state, rejected(1, "boom"));
        let state = Tracker::reduce(state, pending(2));

        assert!(state.is_pending());
        assert!(state.error().is_some());
        let flags = RequestFlags::from(&state);
        assert!(flags.is_loading);
        assert!(flags.failure);

        let state = Tracker::reduce(state, fulfilled(2, "ok"));
        assert!(state.error().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        let state = Tracker::reduce(state, pending(2));

        // The older request resolves last-but-one: ignored.
        let state = Tracker::reduce(state, fulfilled(1, "stale"));
        assert!(state.is_pending());
        assert!(state.data().is_none());

        let state = Tracker::reduce(state, fulfilled(2, "fresh"));
        assert_eq!(state.data().map(String::as_str), Some("fresh"));

        // And once more after settling.
        let state = Tracker::reduce(state, rejected(1, "late"));
        assert!(state.is_success());
    }

    #[test]
    fn response_after_reset_is_discarded() {
        let state = Tracker::reduce(RequestState::default(), pending(1));
        let state = Tracker::reduce(state, RequestIntent::Reset);
        let state = Tracker::reduce(state, rejected(1, "late"));
        assert!(state.is_idle());
        assert!(state.error().is_none());
    }
}
