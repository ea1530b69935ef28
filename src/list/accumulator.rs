use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::keyed::Keyed;

/// How a listing decides that the backend has no more pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfData {
    /// A page shorter than the page size ends the list. A full final page
    /// keeps the list open until an empty page is fetched.
    #[default]
    ShortPage,
    /// Stop once the accumulated length reaches the `totalCount` reported by
    /// the backend. Falls back to [`EndOfData::ShortPage`] when the response
    /// carries no total, and always stops on an empty page.
    TotalCount,
}

/// The page a listing should fetch next.
///
/// `generation` identifies the query the request was issued for; the
/// accumulator ignores results for any other generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub generation: u64,
}

/// Client-side merged list built from repeated paginated fetches.
///
/// Invariant: no two items share a key. Pages are appended in arrival order
/// with already-known keys filtered out; page 1 replaces the list wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ListAccumulator<T: Keyed> {
    items: Vec<T>,
    keys: HashSet<T::Key>,
    /// Next page to request (1-based).
    page: u32,
    page_size: u32,
    has_more: bool,
    total: Option<u64>,
    loading: bool,
    generation: u64,
    end_of_data: EndOfData,
}

impl<T: Keyed> Default for ListAccumulator<T> {
    fn default() -> Self {
        Self::new(10, EndOfData::default())
    }
}

impl<T: Keyed> ListAccumulator<T> {
    pub fn new(page_size: u32, end_of_data: EndOfData) -> Self {
        Self {
            items: Vec::new(),
            keys: HashSet::new(),
            page: 1,
            page_size: page_size.max(1),
            has_more: true,
            total: None,
            loading: false,
            generation: 0,
            end_of_data,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total reported by the last loaded page, if the backend sent one.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn end_of_data(&self) -> EndOfData {
        self.end_of_data
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.keys.contains(key)
    }

    /// Whether a load trigger may start another page load.
    pub fn can_load_more(&self) -> bool {
        self.has_more && !self.loading
    }

    /// The next page to fetch, or `None` when the list is exhausted or a
    /// load is already running.
    pub fn next_page_request(&self) -> Option<PageRequest> {
        self.can_load_more().then_some(PageRequest {
            page: self.page,
            limit: self.page_size,
            generation: self.generation,
        })
    }

    /// Search term, filter or sort changed: start over from page 1.
    ///
    /// Bumps the generation so results still in flight for the old query are
    /// dropped when they arrive.
    pub fn on_query_change(&mut self) {
        self.items.clear();
        self.keys.clear();
        self.page = 1;
        self.has_more = true;
        self.total = None;
        self.loading = false;
        self.generation += 1;
    }

    /// Record that `request` is in flight. Returns `false` for a request
    /// issued under an older query.
    pub fn mark_loading(&mut self, request: PageRequest) -> bool {
        if request.generation != self.generation {
            return false;
        }
        self.loading = true;
        true
    }

    /// Merge a loaded page. Returns `false` (and changes nothing) when the
    /// page belongs to an older query.
    pub fn on_page_loaded(
        &mut self,
        request: PageRequest,
        new_items: Vec<T>,
        total: Option<u64>,
    ) -> bool {
        if request.generation != self.generation {
            return false;
        }

        if request.page <= 1 {
            self.items.clear();
            self.keys.clear();
        }

        let received = new_items.len();
        for item in new_items {
            if self.keys.insert(item.key()) {
                self.items.push(item);
            }
        }

        let short_page_rule = received >= request.limit as usize;
        self.has_more = match (self.end_of_data, total) {
            (EndOfData::ShortPage, _) | (EndOfData::TotalCount, None) => short_page_rule,
            (EndOfData::TotalCount, Some(total)) => {
                received > 0 && (self.items.len() as u64) < total
            }
        };
        self.total = total;
        self.page = request.page + 1;
        self.loading = false;
        true
    }

    /// A page load failed. The list keeps its items and may be retried.
    pub fn on_page_failed(&mut self, request: PageRequest) {
        if request.generation == self.generation {
            self.loading = false;
        }
    }

    /// Insert a freshly created item at the top unless its key is known.
    pub fn prepend(&mut self, item: T) -> bool {
        if !self.keys.insert(item.key()) {
            return false;
        }
        self.items.insert(0, item);
        true
    }

    /// Replace the item with the same key in place. Returns `false` when the
    /// item is not in the list.
    pub fn replace(&mut self, item: T) -> bool {
        let key = item.key();
        match self.items.iter_mut().find(|existing| existing.key() == key) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &T::Key) -> bool {
        if !self.keys.remove(key) {
            return false;
        }
        self.items.retain(|item| &item.key() != key);
        true
    }
}
