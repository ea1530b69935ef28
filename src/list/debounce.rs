use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ListingConfig;

/// Delays search dispatches so only the last value typed within the window
/// reaches the backend.
///
/// Calls already released are never cancelled; the debouncer only decides
/// which values are worth dispatching.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    latest: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Debouncer with the configured `debounce_ms` window.
    pub fn from_config(config: &ListingConfig) -> Self {
        Self::new(Duration::from_millis(config.debounce_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay and return `Some(value)` if no newer value arrived
    /// in the meantime, `None` otherwise.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        (self.latest.load(Ordering::SeqCst) == ticket).then_some(value)
    }
}
