//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Request lifecycle transitions (pending, fulfilled, rejected)
/// - User actions (query changes, dialog close, explicit resets)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
