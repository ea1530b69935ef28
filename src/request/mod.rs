//! Request tracker: per-operation status, payload and error holders.
//!
//! Every remote operation a slice performs owns one [`RequestState`]. The
//! dispatcher feeds it [`RequestIntent`] transitions and the
//! [`RequestReducer`] applies them, discarding responses that belong to a
//! superseded request.

mod error;
mod id;
mod intent;
mod reducer;
mod state;

pub use error::{ErrorPayload, NO_RESPONSE_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
pub use id::RequestId;
pub use intent::RequestIntent;
pub use reducer::RequestReducer;
pub use state::{PendingPolicy, RequestFlags, RequestState, RequestStatus};
