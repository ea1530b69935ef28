//! Feature slices and the application store that combines them.
//!
//! Each slice owns a state struct, an intent enum and a reducer. Thunks are
//! generic over the store they run against: any store whose state exposes
//! the slice through `AsRef` and whose intent accepts the slice's intent
//! through `From` works, so a slice can be tested against its own store or
//! run inside [`AppReducer`].

pub mod approvals;
pub mod catalog;
pub mod listing;
pub mod session;
pub mod users;

use crate::config::Config;
use crate::mvi::{Intent, Reducer, SliceState};
use crate::request::{ErrorPayload, RequestIntent, RequestReducer, RequestState};
use crate::store::{Store, StoreHandle};

use approvals::{ApprovalsIntent, ApprovalsReducer, ApprovalsState};
use catalog::{CatalogIntent, CatalogReducer, CatalogState};
use session::{SessionIntent, SessionReducer, SessionState};
use users::{UsersIntent, UsersReducer, UsersState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub users: UsersState,
    pub approvals: ApprovalsState,
    pub catalog: CatalogState,
    pub session: SessionState,
}

impl SliceState for AppState {}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            users: UsersState::new(&config.listing),
            approvals: ApprovalsState::new(&config.listing),
            catalog: CatalogState::new(&config.listing),
            session: SessionState::default(),
        }
    }
}

impl AsRef<UsersState> for AppState {
    fn as_ref(&self) -> &UsersState {
        &self.users
    }
}

impl AsRef<ApprovalsState> for AppState {
    fn as_ref(&self) -> &ApprovalsState {
        &self.approvals
    }
}

impl AsRef<CatalogState> for AppState {
    fn as_ref(&self) -> &CatalogState {
        &self.catalog
    }
}

impl AsRef<SessionState> for AppState {
    fn as_ref(&self) -> &SessionState {
        &self.session
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    Users(UsersIntent),
    Approvals(ApprovalsIntent),
    Catalog(CatalogIntent),
    Session(SessionIntent),
}

impl Intent for AppIntent {}

impl From<UsersIntent> for AppIntent {
    fn from(intent: UsersIntent) -> Self {
        AppIntent::Users(intent)
    }
}

impl From<ApprovalsIntent> for AppIntent {
    fn from(intent: ApprovalsIntent) -> Self {
        AppIntent::Approvals(intent)
    }
}

impl From<CatalogIntent> for AppIntent {
    fn from(intent: CatalogIntent) -> Self {
        AppIntent::Catalog(intent)
    }
}

impl From<SessionIntent> for AppIntent {
    fn from(intent: SessionIntent) -> Self {
        AppIntent::Session(intent)
    }
}

/// Routes each intent to the slice that owns it.
pub struct AppReducer;

impl Reducer for AppReducer {
    type State = AppState;
    type Intent = AppIntent;

    fn reduce(mut state: AppState, intent: AppIntent) -> AppState {
        match intent {
            AppIntent::Users(intent) => state.users = UsersReducer::reduce(state.users, intent),
            AppIntent::Approvals(intent) => {
                state.approvals = ApprovalsReducer::reduce(state.approvals, intent)
            }
            AppIntent::Catalog(intent) => {
                state.catalog = CatalogReducer::reduce(state.catalog, intent)
            }
            AppIntent::Session(intent) => {
                state.session = SessionReducer::reduce(state.session, intent)
            }
        }
        state
    }
}

pub type AppStore = StoreHandle<AppReducer>;

/// Start the application store with listings sized from `config`.
pub fn spawn_app_store(config: &Config) -> AppStore {
    Store::spawn::<AppReducer>(AppState::new(config), config.store.channel_capacity)
}

/// Apply one transition to a tracker with the normalized error payload.
pub(crate) fn track<T>(state: RequestState<T>, transition: RequestIntent<T>) -> RequestState<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    RequestReducer::<T, ErrorPayload>::reduce(state, transition)
}

/// The payload of `transition` if it is a fulfilment the tracker will
/// accept. Slices use it to mirror a mutation into their lists.
pub(crate) fn settled_payload<'a, T, D>(
    tracker: &RequestState<D>,
    transition: &'a RequestIntent<T>,
) -> Option<&'a T> {
    match transition {
        RequestIntent::Fulfilled {
            request_id,
            payload,
        } if tracker.is_latest(*request_id) => Some(payload),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{EntityId, User};
    use crate::request::RequestId;

    #[tokio::test]
    async fn intents_reach_their_slice() {
        let store = spawn_app_store(&Config::default());
        let request_id = RequestId::next();

        store
            .dispatch(UsersIntent::AddUser(RequestIntent::Pending { request_id }))
            .await
            .unwrap();
        store
            .dispatch(UsersIntent::AddUser(RequestIntent::Fulfilled {
                request_id,
                payload: User {
                    id: EntityId::new("1"),
                    name: "Ann".to_string(),
                    email: "ann@example.com".to_string(),
                    role: None,
                    designation: None,
                    status: None,
                },
            }))
            .await
            .unwrap();

        let state = store.snapshot().await.unwrap();
        assert!(state.users.add_user_flags().success);
        assert_eq!(state.users.users.items().len(), 1);
        assert!(state.approvals.action.is_idle());
        assert!(state.session.login.is_idle());
    }

    #[test]
    fn app_state_sizes_listings_from_config() {
        let mut config = Config::default();
        config.listing.page_size = 25;
        let state = AppState::new(&config);
        assert_eq!(state.users.users.list().page_size(), 25);
        assert_eq!(state.approvals.tickets.list().page_size(), 25);
        assert_eq!(state.catalog.buckets.list().page_size(), 25);
    }
}
