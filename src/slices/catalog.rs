//! Reference data shown in pickers: designations and buckets.

use crate::api::dto::{Bucket, Designation, Page};
use crate::api::ApiClient;
use crate::config::ListingConfig;
use crate::dispatch::ThunkOutcome;
use crate::mvi::{Intent, Reducer, SliceState};
use crate::store::{StoreError, StoreHandle};

use super::listing::{self, Listing, ListingIntent, ListingReducer};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogState {
    pub designations: Listing<Designation>,
    pub buckets: Listing<Bucket>,
}

impl SliceState for CatalogState {}

impl AsRef<CatalogState> for CatalogState {
    fn as_ref(&self) -> &CatalogState {
        self
    }
}

impl CatalogState {
    pub fn new(config: &ListingConfig) -> Self {
        Self {
            designations: Listing::from_config(config),
            buckets: Listing::from_config(config),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIntent {
    Designations(ListingIntent<Designation>),
    Buckets(ListingIntent<Bucket>),
}

impl Intent for CatalogIntent {}

pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Intent = CatalogIntent;

    fn reduce(mut state: CatalogState, intent: CatalogIntent) -> CatalogState {
        match intent {
            CatalogIntent::Designations(intent) => {
                state.designations =
                    ListingReducer::<Designation>::reduce(state.designations, intent);
            }
            CatalogIntent::Buckets(intent) => {
                state.buckets = ListingReducer::<Bucket>::reduce(state.buckets, intent);
            }
        }
        state
    }
}

fn designations<S: AsRef<CatalogState>>(state: &S) -> &Listing<Designation> {
    &state.as_ref().designations
}

fn buckets<S: AsRef<CatalogState>>(state: &S) -> &Listing<Bucket> {
    &state.as_ref().buckets
}

pub async fn fetch_designations<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<Option<ThunkOutcome<Page<Designation>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<CatalogState>,
    R::Intent: From<CatalogIntent>,
{
    listing::load_next_page(
        "fetch_designations",
        store,
        designations::<R::State>,
        |intent| CatalogIntent::Designations(intent).into(),
        |query| async move { api.fetch_designations(&query).await },
    )
    .await
}

pub async fn fetch_buckets<R>(
    store: &StoreHandle<R>,
    api: &ApiClient,
) -> Result<Option<ThunkOutcome<Page<Bucket>>>, StoreError>
where
    R: Reducer,
    R::State: AsRef<CatalogState>,
    R::Intent: From<CatalogIntent>,
{
    listing::load_next_page(
        "fetch_buckets",
        store,
        buckets::<R::State>,
        |intent| CatalogIntent::Buckets(intent).into(),
        |query| async move { api.fetch_buckets(&query).await },
    )
    .await
}
