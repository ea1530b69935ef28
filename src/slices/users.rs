//! User management slice: the paginated user list, roles, and the add /
//! update / delete forms.

use crate::api::dto::{EntityId, NewUser, Page, Role, User, UserUpdate};
use crate::api::ApiClient;
use crate::config::ListingConfig;
use crate::dispatch::{run_thunk, ThunkOutcome};
use crate::list::{Debouncer, LoadTrigger};
use crate::mvi::{Intent, Reducer, SliceState};
use crate::request::{ErrorPayload, PendingPolicy, RequestFlags, RequestIntent, RequestState};
use crate::store::{StoreError, StoreHandle};

use super::listing::{self, ListQuery, Listing, ListingIntent, ListingReducer};
use super::{settled_payload, track};

#[derive(Debug, Clone, PartialEq)]
pub struct UsersState {
    pub users: Listing<User>,
    pub roles: RequestState<Vec<Role>>,
    pub add_user: RequestState<User>,
    pub update_user: RequestState<User>,
    pub delete_user: RequestState<EntityId>,
}

impl Default for UsersState {
    fn default() -> Self {
        Self::new(&ListingConfig::default())
    }
}

impl SliceState for UsersState {}

impl AsRef<UsersState> for UsersState {
    fn as_ref(&self) -> &UsersState {
        self
    }
}

impl UsersState {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            users: Listing::from_config(config),
            roles: RequestState::with_policy(PendingPolicy::LoadingOnly),
            add_user: RequestState::with_policy(PendingPolicy::ClearOutcome),
            update_user: RequestState::with_policy(PendingPolicy::ClearOutcome),
            delete_user: RequestState::with_policy(PendingPolicy::ClearOutcome),
        }
    }

    /// `isAddUserLoading` / `addUserSuccess` / `addUserFailure` / message.
    pub fn add_user_flags(&self) -> RequestFlags {
        RequestFlags::from(&self.add_user)
    }

    pub fn update_user_flags(&self) -> RequestFlags {
        RequestFlags::from(&self.update_user)
    }

    pub fn delete_user_flags(&self) -> RequestFlags {
        RequestFlags::from(&self.delete_user)
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.data().map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UsersIntent {
    Users(ListingIntent<User>),
    Roles(RequestIntent<Vec<Role>>),
    AddUser(RequestIntent<User>),
    UpdateUser(RequestIntent<User>),
    DeleteUser(RequestIntent<EntityId>),
}

impl Intent for UsersIntent {}

pub struct UsersReducer;

impl Reducer for UsersReducer {
    type State = UsersState;
    type Intent = UsersIntent;

    fn reduce(mut state: UsersState, intent: UsersIntent) -> UsersState {
        match intent {
            UsersIntent::Users(intent) => {
                state.users = ListingReducer::<User>::reduce(state.users, intent);
            }
            UsersIntent::Roles(transition) => {
                state.roles = track(state.roles, transition);
            }
            UsersIntent::AddUser(transition) => {
                if let Some(user) = settled_payload(&state.add_user, &transition) {
                    state.users.list_mut().prepend(user.clone());
                }
                state.add_user = track(state.add_user, transition);
            }
            UsersIntent::UpdateUser(transition) => {
                if let Some(user) = settled_payload(&state.update_user, &transition) {
                    state.users.list_mut().replace(user.clone());
                }
                state.update_user = track(state.update_user, transition);
            }
            UsersIntent::DeleteUser(transition) => {
                if let Some(id) = settled_payload(&state.delete_user, &transition) {
                    state.users.list_mut().remove(id);
                }
                state.delete_user = track(state.delete_user, transition);
            }
        }
        state
    }
}

fn users_listing<S: AsRef<UsersState>>(state: &S) -> &Listing<User> {
    &state.as_ref().users
}

fn lift_listing<I: From<UsersIntent>>(intent: ListingIntent<User>) -> I {
    I::from(UsersIntent::Users(intent))
}

/// Load the next page of users (page 1 on a fresh listing).
pub async fn fetch_user_management<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<Option<ThunkOutcome<Page<User>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<UsersState>,
    R::Intent: From<UsersIntent>,
{
    listing::load_next_page(
        "fetch_user_management",
        store,
        users_listing::<R::State>,
        lift_listing::<R::Intent>,
        |query| async move { api.fetch_users(&query).await },
    )
    .await
}

/// Load the next page when a scroll or sentinel signal says the end is near.
pub async fn load_more_users<R, G>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    trigger: &G,
    signal: &G::Signal,
) -> Result<Option<ThunkOutcome<Page<User>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<UsersState>,
    R::Intent: From<UsersIntent>,
    G: LoadTrigger,
{
    listing::load_page_on_trigger(
        "fetch_user_management",
        store,
        users_listing::<R::State>,
        lift_listing::<R::Intent>,
        trigger,
        signal,
        |query| async move { api.fetch_users(&query).await },
    )
    .await
}

/// Restart the user list for a new search term.
pub async fn search_users<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    term: &str,
) -> Result<Option<ThunkOutcome<Page<User>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<UsersState>,
    R::Intent: From<UsersIntent>,
{
    listing::refresh_listing(
        "search_users",
        store,
        ListQuery::search(term),
        users_listing::<R::State>,
        lift_listing::<R::Intent>,
        |query| async move { api.fetch_users(&query).await },
    )
    .await
}

/// [`search_users`] behind a debouncer: returns `Ok(None)` without touching
/// the store when a newer term arrived within the window.
pub async fn search_users_debounced<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    debouncer: &Debouncer,
    term: String,
) -> Result<Option<ThunkOutcome<Page<User>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<UsersState>,
    R::Intent: From<UsersIntent>,
{
    match debouncer.settle(term).await {
        Some(term) => search_users(store, api, &term).await,
        None => Ok(None),
    }
}

pub async fn fetch_roles<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<ThunkOutcome<Vec<Role>>, StoreError>
where
    R: Reducer,
    R::Intent: From<UsersIntent>,
{
    run_thunk(
        "fetch_roles",
        store,
        |transition| UsersIntent::Roles(transition).into(),
        api.fetch_roles(),
    )
    .await
}

/// Create a user. On success the new user is put at the top of the list.
pub async fn add_new_user<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    user: &NewUser,
) -> Result<ThunkOutcome<User>, StoreError>
where
    R: Reducer,
    R::Intent: From<UsersIntent>,
{
    run_thunk(
        "add_new_user",
        store,
        |transition| UsersIntent::AddUser(transition).into(),
        api.create_user(user),
    )
    .await
}

pub async fn update_user<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    id: &EntityId,
    update: &UserUpdate,
) -> Result<ThunkOutcome<User>, StoreError>
where
    R: Reducer,
    R::Intent: From<UsersIntent>,
{
    run_thunk(
        "update_user",
        store,
        |transition| UsersIntent::UpdateUser(transition).into(),
        api.update_user(id, update),
    )
    .await
}

pub async fn delete_user<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    id: &EntityId,
) -> Result<ThunkOutcome<EntityId>, StoreError>
where
    R: Reducer,
    R::Intent: From<UsersIntent>,
{
    run_thunk(
        "delete_user",
        store,
        |transition| UsersIntent::DeleteUser(transition).into(),
        async move { api.delete_user(id).await.map(|_| id.clone()) },
    )
    .await
}

/// Dialog closed: clear every add-user flag and message.
pub async fn reset_add_user_status<R>(store: &StoreHandle<R>) -> Result<(), StoreError>
where
    R: Reducer,
    R::Intent: From<UsersIntent>,
{
    store
        .dispatch(UsersIntent::AddUser(RequestIntent::Reset))
        .await
        .map(|_| ())
}

pub async fn reset_update_user_status<R>(store: &StoreHandle<R>) -> Result<(), StoreError>
where
    R: Reducer,
    R::Intent: From<UsersIntent>,
{
    store
        .dispatch(UsersIntent::UpdateUser(RequestIntent::Reset))
        .await
        .map(|_| ())
}

/// Failure lines for the add-user form, one bullet per backend message.
pub fn add_user_error_lines(state: &UsersState) -> Vec<String> {
    state
        .add_user
        .error()
        .map(ErrorPayload::bullet_lines)
        .unwrap_or_default()
}
