//! Paginated list accumulation for infinite-scroll views.
//!
//! A [`ListAccumulator`] merges pages into one duplicate-free list, decides
//! whether more data exists, and hands out the next [`PageRequest`]. Load
//! triggers (scroll proximity or a sentinel intersection) and the search
//! [`Debouncer`] decide *when* to ask for it.

mod accumulator;
mod debounce;
mod keyed;
mod trigger;

pub use accumulator::{EndOfData, ListAccumulator, PageRequest};
pub use debounce::Debouncer;
pub use keyed::Keyed;
pub use trigger::{
    IntersectionEntry, LoadTrigger, ScrollMetrics, ScrollTrigger, SentinelTrigger,
    DEFAULT_SCROLL_THRESHOLD_PX,
};
