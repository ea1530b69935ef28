//! Session slice: login and token refresh.
//!
//! Tokens live inside [`ApiClient`]; the slice only tracks the calls and the
//! signed-in user.

use crate::api::dto::{LoginRequest, SessionInfo, User};
use crate::api::ApiClient;
use crate::dispatch::{run_thunk, ThunkOutcome};
use crate::mvi::{Intent, Reducer, SliceState};
use crate::request::{PendingPolicy, RequestFlags, RequestIntent, RequestState};
use crate::store::{StoreError, StoreHandle};

use super::{settled_payload, track};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub login: RequestState<SessionInfo>,
    pub refresh: RequestState<SessionInfo>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            login: RequestState::with_policy(PendingPolicy::ClearOutcome),
            refresh: RequestState::with_policy(PendingPolicy::LoadingOnly),
        }
    }
}

impl SliceState for SessionState {}

impl AsRef<SessionState> for SessionState {
    fn as_ref(&self) -> &SessionState {
        self
    }
}

impl SessionState {
    /// The signed-in user, preferring the most recent refresh.
    pub fn user(&self) -> Option<&User> {
        self.refresh
            .data()
            .and_then(|info| info.user.as_ref())
            .or_else(|| self.login.data().and_then(|info| info.user.as_ref()))
    }

    pub fn login_flags(&self) -> RequestFlags {
        RequestFlags::from(&self.login)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    Login(RequestIntent<SessionInfo>),
    Refresh(RequestIntent<SessionInfo>),
    Logout,
}

impl Intent for SessionIntent {}

pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(mut state: SessionState, intent: SessionIntent) -> SessionState {
        match intent {
            SessionIntent::Login(transition) => {
                // A new sign-in supersedes whatever an earlier refresh reported.
                if settled_payload(&state.login, &transition).is_some() {
                    state.refresh = track(state.refresh, RequestIntent::Reset);
                }
                state.login = track(state.login, transition);
            }
            SessionIntent::Refresh(transition) => state.refresh = track(state.refresh, transition),
            SessionIntent::Logout => {
                state.login = track(state.login, RequestIntent::Reset);
                state.refresh = track(state.refresh, RequestIntent::Reset);
            }
        }
        state
    }
}

pub async fn login<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    credentials: &LoginRequest,
) -> Result<ThunkOutcome<SessionInfo>, StoreError>
where
    R: Reducer,
    R::Intent: From<SessionIntent>,
{
    run_thunk(
        "login",
        store,
        |transition| SessionIntent::Login(transition).into(),
        api.login(credentials),
    )
    .await
}

pub async fn refresh_session<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<ThunkOutcome<SessionInfo>, StoreError>
where
    R: Reducer,
    R::Intent: From<SessionIntent>,
{
    run_thunk(
        "refresh_session",
        store,
        |transition| SessionIntent::Refresh(transition).into(),
        api.refresh_session(),
    )
    .await
}

/// Drop the tokens and forget the signed-in user.
pub async fn logout<R>(store: &StoreHandle<R>, api: &ApiClient) -> Result<(), StoreError>
where
    R: Reducer,
    R::Intent: From<SessionIntent>,
{
    api.clear_tokens();
    tracing::info!("Signed out");
    store.dispatch(SessionIntent::Logout).await.map(|_| ())
}
