use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};

use crate::mvi::Reducer;

use super::types::{StoreCommand, StoreError};

const STORE_TIMEOUT: Duration = Duration::from_secs(1);

/// Cloneable entry point to the store actor.
pub struct StoreHandle<R: Reducer> {
    sender: mpsc::Sender<StoreCommand<R>>,
    watcher: watch::Receiver<R::State>,
}

impl<R: Reducer> Clone for StoreHandle<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            watcher: self.watcher.clone(),
        }
    }
}

impl<R: Reducer> StoreHandle<R> {
    pub fn new(sender: mpsc::Sender<StoreCommand<R>>, watcher: watch::Receiver<R::State>) -> Self {
        Self { sender, watcher }
    }

    /// Apply `intent` and wait until the actor has reduced it.
    ///
    /// Returns whether the state changed.
    pub async fn dispatch(&self, intent: impl Into<R::Intent>) -> Result<bool, StoreError> {
        let (respond_to, receiver) = oneshot::channel();
        self.sender
            .send(StoreCommand::Dispatch {
                intent: intent.into(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Disconnected)?;

        recv_with_timeout(receiver).await
    }

    /// Ask the actor for the state after every intent queued so far.
    pub async fn snapshot(&self) -> Result<R::State, StoreError> {
        let (respond_to, receiver) = oneshot::channel();
        self.sender
            .send(StoreCommand::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::Disconnected)?;

        recv_with_timeout(receiver).await
    }

    /// Last published state, without a round trip to the actor.
    pub fn current(&self) -> R::State {
        self.watcher.borrow().clone()
    }

    /// A receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<R::State> {
        let mut receiver = self.watcher.clone();
        receiver.mark_unchanged();
        receiver
    }
}

async fn recv_with_timeout<T>(receiver: oneshot::Receiver<T>) -> Result<T, StoreError> {
    match tokio::time::timeout(STORE_TIMEOUT, receiver).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err(StoreError::Disconnected),
        Err(_) => Err(StoreError::Timeout),
    }
}
