//! Single-writer state container.
//!
//! The store actor owns the application state and is the only task that
//! mutates it. Other tasks talk to it through a cloneable [`StoreHandle`]:
//! intents go in over a bounded channel, snapshots come out over a `watch`
//! channel.

mod client;
mod server;
mod types;

pub use client::StoreHandle;
pub use server::StoreServer;
pub use types::{StoreCommand, StoreError};

use tokio::sync::{mpsc, watch};

use crate::mvi::Reducer;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

pub struct Store;

impl Store {
    /// Create a connected handle/server pair without starting the actor.
    pub fn new<R: Reducer>(
        initial: R::State,
        capacity: usize,
    ) -> (StoreHandle<R>, StoreServer<R>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (updates, watcher) = watch::channel(initial.clone());
        (
            StoreHandle::new(sender, watcher),
            StoreServer::new(receiver, initial, updates),
        )
    }

    /// Create the store and run its actor on the current tokio runtime.
    ///
    /// The actor stops once every handle has been dropped.
    pub fn spawn<R>(initial: R::State, capacity: usize) -> StoreHandle<R>
    where
        R: Reducer + 'static,
    {
        let (handle, server) = Self::new::<R>(initial, capacity);
        tokio::spawn(server.run());
        handle
    }
}
