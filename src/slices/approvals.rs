//! Approval queue: pending business tickets plus approve / reject actions.

use crate::api::dto::{Ack, ApprovalAction, ApprovalTicket, Page};
use crate::api::ApiClient;
use crate::config::ListingConfig;
use crate::dispatch::{run_thunk, ThunkOutcome};
use crate::list::EndOfData;
use crate::mvi::{Intent, Reducer, SliceState};
use crate::request::{PendingPolicy, RequestFlags, RequestIntent, RequestState};
use crate::store::{StoreError, StoreHandle};

use super::listing::{self, Listing, ListingIntent, ListingReducer};
use super::track;

#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalsState {
    pub tickets: Listing<ApprovalTicket>,
    pub action: RequestState<Ack>,
}

impl Default for ApprovalsState {
    fn default() -> Self {
        Self::new(&ListingConfig::default())
    }
}

impl SliceState for ApprovalsState {}

impl AsRef<ApprovalsState> for ApprovalsState {
    fn as_ref(&self) -> &ApprovalsState {
        self
    }
}

impl ApprovalsState {
    /// The ticket endpoint reports `totalCount` reliably, so the queue stops
    /// at the reported total instead of waiting for a short page.
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            tickets: Listing::new(config.page_size, EndOfData::TotalCount),
            action: RequestState::with_policy(PendingPolicy::ClearOutcome),
        }
    }

    pub fn action_flags(&self) -> RequestFlags {
        RequestFlags::from(&self.action)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApprovalsIntent {
    Tickets(ListingIntent<ApprovalTicket>),
    Action(RequestIntent<Ack>),
}

impl Intent for ApprovalsIntent {}

pub struct ApprovalsReducer;

impl Reducer for ApprovalsReducer {
    type State = ApprovalsState;
    type Intent = ApprovalsIntent;

    fn reduce(mut state: ApprovalsState, intent: ApprovalsIntent) -> ApprovalsState {
        match intent {
            ApprovalsIntent::Tickets(intent) => {
                state.tickets = ListingReducer::<ApprovalTicket>::reduce(state.tickets, intent);
            }
            ApprovalsIntent::Action(transition) => {
                state.action = track(state.action, transition);
            }
        }
        state
    }
}

fn tickets_listing<S: AsRef<ApprovalsState>>(state: &S) -> &Listing<ApprovalTicket> {
    &state.as_ref().tickets
}

fn lift_listing<I: From<ApprovalsIntent>>(intent: ListingIntent<ApprovalTicket>) -> I {
    I::from(ApprovalsIntent::Tickets(intent))
}

/// Reload the queue from page 1, keeping the current filters.
pub async fn fetch_approvals<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<Option<ThunkOutcome<Page<ApprovalTicket>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<ApprovalsState>,
    R::Intent: From<ApprovalsIntent>,
{
    let state = store.snapshot().await?;
    let query = tickets_listing(&state).query().clone();
    listing::refresh_listing(
        "fetch_approvals",
        store,
        query,
        tickets_listing::<R::State>,
        lift_listing::<R::Intent>,
        |query| async move { api.fetch_approval_tickets(&query).await },
    )
    .await
}

pub async fn load_more_approvals<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<Option<ThunkOutcome<Page<ApprovalTicket>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<ApprovalsState>,
    R::Intent: From<ApprovalsIntent>,
{
    listing::load_next_page(
        "fetch_approvals",
        store,
        tickets_listing::<R::State>,
        lift_listing::<R::Intent>,
        |query| async move { api.fetch_approval_tickets(&query).await },
    )
    .await
}

pub async fn approval_action<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    action: &ApprovalAction,
) -> Result<ThunkOutcome<Ack>, StoreError>
where
    R: Reducer,
    R::Intent: From<ApprovalsIntent>,
{
    run_thunk(
        "approval_action",
        store,
        |transition| ApprovalsIntent::Action(transition).into(),
        api.submit_approval_action(action),
    )
    .await
}

/// Approve or reject a ticket, then reload the queue.
///
/// The two steps are not atomic: when the action fails the queue is left
/// as it was, and when the reload fails the action's success stays recorded.
/// Returns the action's outcome.
pub async fn approve_then_refetch<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
    action: &ApprovalAction,
) -> Result<ThunkOutcome<Ack>, StoreError>
where
    R: Reducer,
    R::State: AsRef<ApprovalsState>,
    R::Intent: From<ApprovalsIntent>,
{
    let outcome = approval_action(store, api, action).await?;
    if outcome.is_ok() {
        fetch_approvals(store, api).await?;
    }
    Ok(outcome)
}

pub async fn reset_approval_action<R>(store: &StoreHandle<R>) -> Result<(), StoreError>
where
    R: Reducer,
    R::Intent: From<ApprovalsIntent>,
{
    store
        .dispatch(ApprovalsIntent::Action(RequestIntent::Reset))
        .await
        .map(|_| ())
}
