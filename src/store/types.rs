use thiserror::Error;
use tokio::sync::oneshot;

use crate::mvi::Reducer;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store actor is not running")]
    Disconnected,
    #[error("store actor did not answer in time")]
    Timeout,
}

pub enum StoreCommand<R: Reducer> {
    /// Apply an intent. Replies whether the state changed.
    Dispatch {
        intent: R::Intent,
        respond_to: oneshot::Sender<bool>,
    },
    Snapshot {
        respond_to: oneshot::Sender<R::State>,
    },
}
