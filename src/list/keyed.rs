use std::fmt::Debug;
use std::hash::Hash;

/// Items that carry a stable domain identifier (`id`, `userId`, ...).
///
/// The key is what deduplication compares; two items with the same key are
/// the same entity even when their other fields differ.
pub trait Keyed {
    type Key: Clone + Debug + Eq + Hash + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}
