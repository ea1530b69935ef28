//! Model-View-Intent primitives shared by every feature slice.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                 │
//!    └─────────── Thunks ──────────────┘
//! ```
//!
//! - **State**: Cloneable snapshot of one slice (or the whole store)
//! - **Intent**: Lifecycle transitions and user actions
//! - **Reducer**: Pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SliceState;
