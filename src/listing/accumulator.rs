//! Merges incrementally fetched pages into one list per filter key.

use std::collections::{BTreeMap, HashSet};

use crate::domain::filter::FilterKey;
use crate::domain::page::{PageInfo, PageResult};
use crate::listing::source::Identified;

/// Pages accumulated for a single [`FilterKey`].
///
/// Pages are stored by index. Only the contiguous run starting at page 1 is
/// exposed, so a page that arrives ahead of a gap stays hidden until the gap
/// is filled.
#[derive(Debug, Clone)]
pub struct Accumulator<T> {
    key: Option<FilterKey>,
    pages: BTreeMap<usize, PageResult<T>>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            key: None,
            pages: BTreeMap::new(),
        }
    }
}

impl<T: Identified> Accumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&FilterKey> {
        self.key.as_ref()
    }

    /// Metadata of the last page of the exposed run. Pages held back behind
    /// a gap are not reported.
    pub fn pagination(&self) -> Option<PageInfo> {
        self.pages
            .values()
            .take(self.contiguous_pages())
            .last()
            .map(|page| page.pagination)
    }

    /// Functional form of [`Accumulator::insert`].
    #[must_use]
    pub fn merge(mut self, key: &FilterKey, page_number: usize, page: PageResult<T>) -> Self {
        self.insert(key, page_number, page);
        self
    }

    /// Stores `page` as page `page_number` of `key`, discarding everything
    /// accumulated for a different key first.
    pub fn insert(&mut self, key: &FilterKey, page_number: usize, page: PageResult<T>) {
        if page_number == 0 {
            return;
        }
        if self.key.as_ref() != Some(key) {
            self.reset();
            self.key = Some(key.clone());
        }
        self.pages.insert(page_number, page);
    }

    pub fn reset(&mut self) {
        self.key = None;
        self.pages.clear();
    }

    pub fn has_page(&self, page_number: usize) -> bool {
        self.pages.contains_key(&page_number)
    }

    /// Number of pages in the exposed contiguous run.
    pub fn contiguous_pages(&self) -> usize {
        self.pages
            .keys()
            .zip(1..)
            .take_while(|(stored, expected)| **stored == *expected)
            .count()
    }

    /// Raw items of one stored page, even if it is not yet exposed.
    pub fn page(&self, page_number: usize) -> Option<&[T]> {
        self.pages
            .get(&page_number)
            .map(|page| page.items.as_slice())
    }

    /// The exposed list: pages `1..=k` concatenated, without repeated
    /// identities.
    pub fn items(&self) -> Vec<&T> {
        let run = self.contiguous_pages();
        let mut seen = HashSet::new();
        self.pages
            .values()
            .take(run)
            .flat_map(|page| &page.items)
            .filter(|item| seen.insert(item.identity()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.contiguous_pages() == 0
    }
}
