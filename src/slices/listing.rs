//! Reusable paginated listing: a [`ListAccumulator`] plus the tracker of its
//! page fetches.
//!
//! Every listing screen (users, approvals, designations, buckets) embeds one
//! [`Listing`] and forwards [`ListingIntent`]s to [`ListingReducer`].

use std::future::Future;
use std::marker::PhantomData;

use crate::api::dto::{Page, PageQuery};
use crate::api::ApiError;
use crate::config::ListingConfig;
use crate::dispatch::{run_thunk, ThunkOutcome};
use crate::list::{EndOfData, Keyed, ListAccumulator, LoadTrigger, PageRequest};
use crate::mvi::{Intent, Reducer, SliceState};
use crate::request::{
    ErrorPayload, PendingPolicy, RequestFlags, RequestIntent, RequestReducer, RequestState,
};
use crate::store::{StoreError, StoreHandle};

/// Filters applied to a listing. Changing them restarts the listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    /// Query for a search box value; blank input means no search.
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        Self {
            search: (!term.is_empty()).then(|| term.to_string()),
            status: None,
        }
    }
}

/// What the last successful page fetch returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedPage {
    pub page: u32,
    pub received: usize,
    pub total: Option<u64>,
}

type FetchTracker = RequestReducer<LoadedPage, ErrorPayload>;

#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T: Keyed> {
    query: ListQuery,
    list: ListAccumulator<T>,
    fetch: RequestState<LoadedPage>,
}

impl<T: Keyed> Default for Listing<T> {
    fn default() -> Self {
        Self::from_config(&ListingConfig::default())
    }
}

impl<T> SliceState for Listing<T> where T: Keyed + Clone + PartialEq + Send + Sync + 'static {}

impl<T: Keyed> Listing<T> {
    pub fn new(page_size: u32, end_of_data: EndOfData) -> Self {
        Self {
            query: ListQuery::default(),
            list: ListAccumulator::new(page_size, end_of_data),
            // Page fetches only raise the loading flag; a previous failure
            // stays visible until the retry settles.
            fetch: RequestState::with_policy(PendingPolicy::LoadingOnly),
        }
    }

    pub fn from_config(config: &ListingConfig) -> Self {
        Self::new(config.page_size, config.end_of_data)
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn list(&self) -> &ListAccumulator<T> {
        &self.list
    }

    pub fn items(&self) -> &[T] {
        self.list.items()
    }

    pub fn fetch(&self) -> &RequestState<LoadedPage> {
        &self.fetch
    }

    pub fn flags(&self) -> RequestFlags {
        RequestFlags::from(&self.fetch)
    }

    /// Wire query for `request` under the current filters.
    pub fn page_query(&self, request: PageRequest) -> PageQuery {
        PageQuery {
            page: request.page,
            limit: request.limit,
            search: self.query.search.clone(),
            status: self.query.status.clone(),
        }
    }

    pub(crate) fn list_mut(&mut self) -> &mut ListAccumulator<T> {
        &mut self.list
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingIntent<T> {
    /// New filters: drop the accumulated items and start over from page 1.
    QueryChanged(ListQuery),
    /// Lifecycle transition of the fetch for `request`.
    Page {
        request: PageRequest,
        transition: RequestIntent<Page<T>>,
    },
    /// Back to an empty, unfiltered listing.
    Reset,
}

impl<T: Send + 'static> Intent for ListingIntent<T> {}

pub struct ListingReducer<T>(PhantomData<fn() -> T>);

impl<T> Reducer for ListingReducer<T>
where
    T: Keyed + Clone + PartialEq + Send + Sync + 'static,
{
    type State = Listing<T>;
    type Intent = ListingIntent<T>;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListingIntent::QueryChanged(query) => {
                state.query = query;
                state.list.on_query_change();
                state.fetch = FetchTracker::reduce(state.fetch, RequestIntent::Reset);
            }
            ListingIntent::Reset => {
                return Self::reduce(state, ListingIntent::QueryChanged(ListQuery::default()));
            }
            ListingIntent::Page {
                request,
                transition,
            } => match transition {
                RequestIntent::Pending { request_id } => {
                    if state.list.mark_loading(request) {
                        state.fetch = FetchTracker::reduce(
                            state.fetch,
                            RequestIntent::Pending { request_id },
                        );
                    } else {
                        tracing::debug!(
                            page = request.page,
                            "Ignoring page load for a previous query"
                        );
                    }
                }
                RequestIntent::Fulfilled {
                    request_id,
                    payload,
                } => {
                    if !state.fetch.is_latest(request_id) {
                        tracing::debug!(%request_id, page = request.page, "Discarding stale page");
                        return state;
                    }
                    let loaded = LoadedPage {
                        page: request.page,
                        received: payload.data.len(),
                        total: payload.total,
                    };
                    if state.list.on_page_loaded(request, payload.data, payload.total) {
                        state.fetch = FetchTracker::reduce(
                            state.fetch,
                            RequestIntent::Fulfilled {
                                request_id,
                                payload: loaded,
                            },
                        );
                    }
                }
                RequestIntent::Rejected { request_id, error } => {
                    if state.fetch.is_latest(request_id) {
                        state.list.on_page_failed(request);
                    }
                    state.fetch = FetchTracker::reduce(
                        state.fetch,
                        RequestIntent::Rejected { request_id, error },
                    );
                }
                RequestIntent::Reset => {
                    state.list.on_page_failed(request);
                    state.fetch = FetchTracker::reduce(state.fetch, RequestIntent::Reset);
                }
            },
        }
        state
    }
}

/// Fetch the next page of the listing selected by `select`, if it has more
/// data and no load is running.
///
/// Returns `Ok(None)` when there was nothing to load.
pub async fn load_next_page<R, T, S, L, F, Fut>(
    name: &'static str,
    store: &StoreHandle<R>,
    select: S,
    lift: L,
    fetch: F,
) -> Result<Option<ThunkOutcome<Page<T>>>, StoreError>
where
    R: Reducer,
    T: Keyed + Clone,
    S: Fn(&R::State) -> &Listing<T>,
    L: Fn(ListingIntent<T>) -> R::Intent,
    F: FnOnce(PageQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    load_page(name, store, select, lift, ListAccumulator::<T>::next_page_request, fetch).await
}

/// Like [`load_next_page`], but only when `trigger` judges `signal` close
/// enough to the end of the list.
pub async fn load_page_on_trigger<R, T, S, L, G, F, Fut>(
    name: &'static str,
    store: &StoreHandle<R>,
    select: S,
    lift: L,
    trigger: &G,
    signal: &G::Signal,
    fetch: F,
) -> Result<Option<ThunkOutcome<Page<T>>>, StoreError>
where
    R: Reducer,
    T: Keyed + Clone,
    S: Fn(&R::State) -> &Listing<T>,
    L: Fn(ListingIntent<T>) -> R::Intent,
    G: LoadTrigger,
    F: FnOnce(PageQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    load_page(name, store, select, lift, |list| trigger.next_request(list, signal), fetch).await
}

/// Apply `query` and fetch the first page for it.
pub async fn refresh_listing<R, T, S, L, F, Fut>(
    name: &'static str,
    store: &StoreHandle<R>,
    query: ListQuery,
    select: S,
    lift: L,
    fetch: F,
) -> Result<Option<ThunkOutcome<Page<T>>>, StoreError>
where
    R: Reducer,
    T: Keyed + Clone,
    S: Fn(&R::State) -> &Listing<T>,
    L: Fn(ListingIntent<T>) -> R::Intent,
    F: FnOnce(PageQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    store.dispatch(lift(ListingIntent::QueryChanged(query))).await?;
    load_next_page(name, store, select, lift, fetch).await
}

async fn load_page<R, T, S, L, P, F, Fut>(
    name: &'static str,
    store: &StoreHandle<R>,
    select: S,
    lift: L,
    pick: P,
    fetch: F,
) -> Result<Option<ThunkOutcome<Page<T>>>, StoreError>
where
    R: Reducer,
    T: Keyed + Clone,
    S: Fn(&R::State) -> &Listing<T>,
    L: Fn(ListingIntent<T>) -> R::Intent,
    P: FnOnce(&ListAccumulator<T>) -> Option<PageRequest>,
    F: FnOnce(PageQuery) -> Fut,
    Fut: Future<Output = Result<Page<T>, ApiError>>,
{
    let snapshot = store.snapshot().await?;
    let listing = select(&snapshot);
    let Some(request) = pick(listing.list()) else {
        tracing::debug!(listing = name, "No page to load");
        return Ok(None);
    };
    let query = listing.page_query(request);

    let outcome = run_thunk(
        name,
        store,
        |transition| lift(ListingIntent::Page {
            request,
            transition,
        }),
        fetch(query),
    )
    .await?;
    Ok(Some(outcome))
}
