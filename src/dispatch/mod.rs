//! Thunk wrapper: run one remote call and feed its lifecycle into the store.
//!
//! A thunk allocates a fresh [`RequestId`], dispatches `Pending`, awaits the
//! call once, then dispatches `Fulfilled` or `Rejected`. There is no retry,
//! backoff or extra timeout; a failure is terminal until the caller runs the
//! thunk again.

use std::future::Future;

use crate::api::ApiError;
use crate::mvi::Reducer;
use crate::request::{ErrorPayload, RequestId, RequestIntent};
use crate::store::{StoreError, StoreHandle};

/// Outcome of a thunk as seen by the caller, after the store was updated.
pub type ThunkOutcome<T> = Result<T, ErrorPayload>;

/// Run the remote operation `name` and record its lifecycle in `store`.
///
/// `lift` wraps each [`RequestIntent`] into the store's intent type, e.g.
/// `UsersIntent::AddUser`. It is called once for `Pending` and once for the
/// terminal transition.
///
/// The outer `Result` only fails when the store itself is unreachable;
/// remote failures are normalized into [`ErrorPayload`] and returned in the
/// inner `Result` after being stored.
pub async fn run_thunk<R, T, L, F>(
    name: &'static str,
    store: &StoreHandle<R>,
    lift: L,
    call: F,
) -> Result<ThunkOutcome<T>, StoreError>
where
    R: Reducer,
    T: Clone,
    L: Fn(RequestIntent<T>) -> R::Intent,
    F: Future<Output = Result<T, ApiError>>,
{
    let request_id = RequestId::next();
    tracing::debug!(thunk = name, %request_id, "pending");
    store
        .dispatch(lift(RequestIntent::Pending { request_id }))
        .await?;

    match call.await {
        Ok(payload) => {
            tracing::debug!(thunk = name, %request_id, "fulfilled");
            store
                .dispatch(lift(RequestIntent::Fulfilled {
                    request_id,
                    payload: payload.clone(),
                }))
                .await?;
            Ok(Ok(payload))
        }
        Err(err) => {
            let error = err.to_payload();
            tracing::warn!(thunk = name, %request_id, error = %err, "rejected");
            store
                .dispatch(lift(RequestIntent::Rejected {
                    request_id,
                    error: error.clone(),
                }))
                .await?;
            Ok(Err(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{RequestReducer, RequestState, RequestStatus};
    use crate::store::Store;

    type Tracker = RequestReducer<u32, ErrorPayload>;

    fn identity(transition: RequestIntent<u32>) -> RequestIntent<u32> {
        transition
    }

    #[tokio::test]
    async fn fulfilled_call_reaches_the_store() {
        let store = Store::spawn::<Tracker>(RequestState::default(), 8);

        let outcome = run_thunk("answer", &store, identity, async { Ok::<_, ApiError>(42) })
            .await
            .expect("store alive");

        assert_eq!(outcome, Ok(42));
        let state = store.snapshot().await.unwrap();
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.data(), Some(&42));
    }

    #[tokio::test]
    async fn rejected_call_is_normalized() {
        let store = Store::spawn::<Tracker>(RequestState::default(), 8);

        let outcome = run_thunk("answer", &store, identity, async {
            Err::<u32, _>(ApiError::Status {
                method: "GET".to_string(),
                path: "/answer".to_string(),
                status: 400,
                body: br#"{"message": "bad question"}"#.to_vec(),
            })
        })
        .await
        .expect("store alive");

        let error = outcome.expect_err("rejected");
        assert_eq!(error.message, vec!["bad question".to_string()]);
        assert_eq!(error.status_code, Some(400));
        let state = store.snapshot().await.unwrap();
        assert!(state.is_failure());
        assert_eq!(state.error(), Some(&error));
    }

    #[tokio::test]
    async fn pending_is_visible_while_the_call_runs() {
        let store = Store::spawn::<Tracker>(RequestState::default(), 8);
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let mut updates = store.subscribe();

        let task = tokio::spawn({
            let store = store.clone();
            async move {
                run_thunk("slow", &store, identity, async move {
                    let _ = gate.await;
                    Ok::<_, ApiError>(7)
                })
                .await
            }
        });

        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().is_pending());

        release.send(()).unwrap();
        let outcome = task.await.unwrap().unwrap();
        assert_eq!(outcome, Ok(7));
        assert!(store.snapshot().await.unwrap().is_success());
    }
}
