use tokio::sync::{mpsc, watch};

use crate::mvi::Reducer;

use super::types::StoreCommand;

/// The store actor. Owns the state; see [`super::Store`].
pub struct StoreServer<R: Reducer> {
    pub(crate) receiver: mpsc::Receiver<StoreCommand<R>>,
    state: R::State,
    updates: watch::Sender<R::State>,
}

impl<R: Reducer> StoreServer<R> {
    pub fn new(
        receiver: mpsc::Receiver<StoreCommand<R>>,
        state: R::State,
        updates: watch::Sender<R::State>,
    ) -> Self {
        Self {
            receiver,
            state,
            updates,
        }
    }

    pub async fn run(mut self) {
        while let Some(command) = self.receiver.recv().await {
            match command {
                StoreCommand::Dispatch { intent, respond_to } => {
                    let changed = self.apply(intent);
                    if respond_to.send(changed).is_err() {
                        tracing::trace!("Store: Dispatch response dropped (receiver gone)");
                    }
                }
                StoreCommand::Snapshot { respond_to } => {
                    if respond_to.send(self.state.clone()).is_err() {
                        tracing::trace!("Store: Snapshot response dropped (receiver gone)");
                    }
                }
            }
        }
        tracing::debug!("Store: all handles dropped, actor stopping");
    }

    fn apply(&mut self, intent: R::Intent) -> bool {
        let previous = self.state.clone();
        self.state = R::reduce(previous.clone(), intent);
        let changed = self.state != previous;
        if changed {
            self.updates.send_replace(self.state.clone());
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::mvi::{Intent, SliceState};
    use crate::store::{Store, StoreError};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Counter {
        value: i64,
    }

    impl SliceState for Counter {}

    enum CounterIntent {
        Add(i64),
        Noop,
    }

    impl Intent for CounterIntent {}

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = Counter;
        type Intent = CounterIntent;

        fn reduce(state: Counter, intent: CounterIntent) -> Counter {
            match intent {
                CounterIntent::Add(delta) => Counter {
                    value: state.value + delta,
                },
                CounterIntent::Noop => state,
            }
        }
    }

    #[tokio::test]
    async fn dispatch_updates_snapshot_and_subscribers() {
        let handle = Store::spawn::<CounterReducer>(Counter::default(), 8);
        let mut updates = handle.subscribe();

        assert!(handle.dispatch(CounterIntent::Add(2)).await.unwrap());
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().value, 2);

        assert!(handle.dispatch(CounterIntent::Add(3)).await.unwrap());
        assert_eq!(handle.snapshot().await.unwrap().value, 5);
        assert_eq!(handle.current().value, 5);
    }

    #[tokio::test]
    async fn unchanged_state_does_not_notify() {
        let handle = Store::spawn::<CounterReducer>(Counter::default(), 8);
        let updates = handle.subscribe();

        assert!(!handle.dispatch(CounterIntent::Noop).await.unwrap());
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test]
    async fn dropped_server_reports_disconnect() {
        let (handle, server) = Store::new::<CounterReducer>(Counter::default(), 8);
        drop(server);
        let result = handle.dispatch(CounterIntent::Add(1)).await;
        assert_eq!(result, Err(StoreError::Disconnected));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let (handle, mut server) = Store::new::<CounterReducer>(Counter::default(), 8);

        // Receive but never answer.
        let server_task = tokio::spawn(async move {
            let _command = server.receiver.recv().await;
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let result = handle.snapshot().await;
        assert_eq!(result, Err(StoreError::Timeout));

        server_task.abort();
    }
}
