//! Conditions that start the next page load.

use super::accumulator::{ListAccumulator, PageRequest};
use super::keyed::Keyed;
use crate::config::ListingConfig;

/// Distance from the document bottom (in pixels) that counts as "near the end".
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 100.0;

/// A signal source that can ask a listing for its next page.
///
/// Triggers only judge proximity; whether a load may start is always
/// decided by the accumulator (`has_more` and no load in flight).
pub trait LoadTrigger {
    type Signal;

    fn is_near_end(&self, signal: &Self::Signal) -> bool;

    fn next_request<T: Keyed>(
        &self,
        list: &ListAccumulator<T>,
        signal: &Self::Signal,
    ) -> Option<PageRequest> {
        if !self.is_near_end(signal) {
            return None;
        }
        list.next_page_request()
    }
}

/// Viewport position reported by a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> f64 {
        self.document_height - (self.scroll_top + self.viewport_height)
    }
}

/// Fires when the viewport is within `threshold_px` of the document bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrigger {
    pub threshold_px: f64,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }
}

impl ScrollTrigger {
    /// Trigger using the configured `scroll_threshold_px`.
    pub fn from_config(config: &ListingConfig) -> Self {
        Self {
            threshold_px: config.scroll_threshold_px,
        }
    }
}

impl LoadTrigger for ScrollTrigger {
    type Signal = ScrollMetrics;

    fn is_near_end(&self, signal: &ScrollMetrics) -> bool {
        signal.distance_to_bottom() <= self.threshold_px
    }
}

/// Observation of the sentinel element placed after the last row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

/// Fires when the sentinel element scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SentinelTrigger {
    /// Minimum visible fraction of the sentinel; `0.0` means any overlap.
    pub min_ratio: f64,
}

impl LoadTrigger for SentinelTrigger {
    type Signal = IntersectionEntry;

    fn is_near_end(&self, entry: &IntersectionEntry) -> bool {
        entry.is_intersecting && entry.intersection_ratio >= self.min_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::EndOfData;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32);

    impl Keyed for Row {
        type Key = u32;

        fn key(&self) -> u32 {
            self.0
        }
    }

    fn metrics(scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            viewport_height: 800.0,
            document_height: 2000.0,
        }
    }

    #[test]
    fn scroll_within_threshold_fires() {
        let trigger = ScrollTrigger::default();
        assert!(!trigger.is_near_end(&metrics(1099.0)));
        assert!(trigger.is_near_end(&metrics(1100.0)));
        assert!(trigger.is_near_end(&metrics(1200.0)));
    }

    #[test]
    fn configured_threshold_widens_the_window() {
        let config = ListingConfig {
            scroll_threshold_px: 300.0,
            ..ListingConfig::default()
        };
        let trigger = ScrollTrigger::from_config(&config);
        assert!(!trigger.is_near_end(&metrics(899.0)));
        assert!(trigger.is_near_end(&metrics(900.0)));
        assert_eq!(
            ScrollTrigger::from_config(&ListingConfig::default()),
            ScrollTrigger::default()
        );
    }

    #[test]
    fn sentinel_fires_only_when_visible_enough() {
        let trigger = SentinelTrigger { min_ratio: 0.5 };
        let hidden = IntersectionEntry {
            is_intersecting: false,
            intersection_ratio: 0.0,
        };
        let partial = IntersectionEntry {
            is_intersecting: true,
            intersection_ratio: 0.25,
        };
        let visible = IntersectionEntry {
            is_intersecting: true,
            intersection_ratio: 0.75,
        };
        assert!(!trigger.is_near_end(&hidden));
        assert!(!trigger.is_near_end(&partial));
        assert!(trigger.is_near_end(&visible));
    }

    #[test]
    fn trigger_respects_accumulator_gate() {
        let trigger = ScrollTrigger::default();
        let mut list: ListAccumulator<Row> = ListAccumulator::new(2, EndOfData::ShortPage);

        let request = trigger
            .next_request(&list, &metrics(1200.0))
            .expect("near the end with more data");
        list.mark_loading(request);
        assert!(trigger.next_request(&list, &metrics(1200.0)).is_none());

        list.on_page_loaded(request, vec![Row(1)], None);
        assert!(!list.has_more());
        assert!(trigger.next_request(&list, &metrics(1200.0)).is_none());
    }
}
