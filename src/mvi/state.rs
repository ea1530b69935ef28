//! Base trait for slice state in MVI architecture.

/// Marker trait for state objects held by the store.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq so the store can skip no-op notifications)
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}
