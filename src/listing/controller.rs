//! Page navigation over a [`ListingSource`] with a busy guard, next-page
//! prefetching and stale-response suppression.

use crate::domain::filter::FilterState;
use crate::domain::page::PageResult;
use crate::listing::accumulator::Accumulator;
use crate::listing::source::{Identified, ListingSource, QueryError, clamp_limit};

/// Handle for one outstanding fetch. Only the controller can mint one, and
/// [`PaginationController::complete`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct PageTicket {
    page: usize,
    epoch: u64,
    prefetch: bool,
}

impl PageTicket {
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_prefetch(&self) -> bool {
        self.prefetch
    }
}

/// Answer to a navigation request.
#[derive(Debug, PartialEq, Eq)]
pub enum PageRequest {
    /// Rejected: same page, busy, out of range, past the end of the
    /// accumulated run, or detached.
    Ignored,
    /// Served from the prefetched page; no fetch is needed.
    Cached,
    /// The caller must fetch `ticket.page()` and hand the result to
    /// [`PaginationController::complete`].
    Fetch(PageTicket),
}

/// What [`PaginationController::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Prefetched,
    Failed,
    /// The filter changed or the controller was detached after the request
    /// was issued; the result was dropped.
    Stale,
}

/// Outcome of [`PaginationController::go_to_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Ignored,
    Cached,
    Completed(Completion),
}

/// Tracks the displayed page of one listing query.
///
/// State moves `Idle -> Loading -> Idle`; requests made while loading are
/// rejected rather than queued.
#[derive(Debug)]
pub struct PaginationController<T> {
    filter: FilterState,
    limit: usize,
    epoch: u64,
    detached: bool,
    current_page: usize,
    total_pages: Option<usize>,
    total_items: usize,
    loading: Option<usize>,
    prefetching: Option<usize>,
    prefetched: Option<(usize, PageResult<T>)>,
    last_error: Option<QueryError>,
    accumulator: Accumulator<T>,
}

impl<T: Identified> PaginationController<T> {
    pub fn new(filter: FilterState, limit: usize) -> Self {
        Self {
            filter,
            limit: clamp_limit(limit),
            epoch: 0,
            detached: false,
            current_page: 0,
            total_pages: None,
            total_items: 0,
            loading: None,
            prefetching: None,
            prefetched: None,
            last_error: None,
            accumulator: Accumulator::new(),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// `0` until the first page has been loaded.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `0` until totals are known.
    pub fn total_pages(&self) -> usize {
        self.total_pages.unwrap_or(0)
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn last_error(&self) -> Option<&QueryError> {
        self.last_error.as_ref()
    }

    /// Every item accumulated so far for the active filter.
    pub fn items(&self) -> Vec<&T> {
        self.accumulator.items()
    }

    /// Items of the page currently displayed.
    pub fn page_items(&self) -> &[T] {
        self.accumulator.page(self.current_page).unwrap_or(&[])
    }

    pub fn has_prefetched(&self, page: usize) -> bool {
        matches!(&self.prefetched, Some((n, _)) if *n == page)
    }

    /// Replaces the filter. A different filter key drops every accumulated
    /// page and invalidates outstanding requests; returns whether it did.
    pub fn set_filter(&mut self, filter: FilterState) -> bool {
        if filter.key() == self.filter.key() {
            self.filter = filter;
            return false;
        }
        self.filter = filter;
        self.invalidate();
        self.accumulator.reset();
        self.current_page = 0;
        self.total_pages = None;
        self.total_items = 0;
        self.last_error = None;
        true
    }

    /// Stops accepting results; anything still in flight will be dropped.
    pub fn detach(&mut self) {
        self.detached = true;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.epoch += 1;
        self.loading = None;
        self.prefetching = None;
        self.prefetched = None;
    }

    fn accepts(&self, page: usize) -> bool {
        if self.detached || self.is_loading() || page == 0 || page == self.current_page {
            return false;
        }
        match self.total_pages {
            Some(total) => page <= total,
            None => true,
        }
    }

    /// Highest page that can be displayed without leaving a gap in the
    /// accumulated list.
    fn reachable_page(&self) -> usize {
        self.accumulator.contiguous_pages() + 1
    }

    /// First phase of a page change. Only pages up to one past the
    /// accumulated run are accepted; [`PaginationController::go_to_page`]
    /// walks longer jumps page by page.
    pub fn begin_page(&mut self, page: usize) -> PageRequest {
        if !self.accepts(page) || page > self.reachable_page() {
            return PageRequest::Ignored;
        }

        match self.prefetched.take() {
            Some((prefetched, result)) if prefetched == page => {
                self.apply(page, result);
                return PageRequest::Cached;
            }
            other => self.prefetched = other,
        }

        self.loading = Some(page);
        PageRequest::Fetch(PageTicket {
            page,
            epoch: self.epoch,
            prefetch: false,
        })
    }

    /// Ticket for the page after the current one, unless it is already
    /// prefetched, being prefetched, or past the end.
    pub fn prefetch_ticket(&mut self) -> Option<PageTicket> {
        if self.detached || self.prefetching.is_some() || self.current_page == 0 {
            return None;
        }
        let next = self.current_page + 1;
        if next > self.total_pages() || self.has_prefetched(next) {
            return None;
        }
        self.prefetching = Some(next);
        Some(PageTicket {
            page: next,
            epoch: self.epoch,
            prefetch: true,
        })
    }

    /// Second phase: hand over the result for `ticket`.
    pub fn complete(
        &mut self,
        ticket: PageTicket,
        result: Result<PageResult<T>, QueryError>,
    ) -> Completion {
        if ticket.epoch != self.epoch {
            log::warn!(
                "Dropping stale response for page {} (epoch {} < {})",
                ticket.page,
                ticket.epoch,
                self.epoch
            );
            return Completion::Stale;
        }

        if ticket.prefetch {
            self.prefetching = None;
            return match result {
                Ok(page) => {
                    // A page displaced from the slot is kept in the accumulator.
                    if let Some((displaced, result)) =
                        self.prefetched.replace((ticket.page, page))
                    {
                        let key = self.filter.key();
                        self.accumulator.insert(&key, displaced, result);
                    }
                    Completion::Prefetched
                }
                Err(err) => {
                    log::warn!("Prefetch of page {} failed: {err}", ticket.page);
                    Completion::Failed
                }
            };
        }

        self.loading = None;
        match result {
            Ok(page) => {
                self.apply(ticket.page, page);
                Completion::Applied
            }
            Err(err) => {
                log::error!("Loading page {} failed: {err}", ticket.page);
                self.last_error = Some(err);
                Completion::Failed
            }
        }
    }

    fn apply(&mut self, page_number: usize, page: PageResult<T>) {
        let info = page.pagination;
        self.current_page = page_number;
        self.total_pages = Some(info.total_pages);
        self.total_items = info.total_items;
        self.last_error = None;
        if self.has_prefetched(page_number) {
            self.prefetched = None;
        }
        let key = self.filter.key();
        self.accumulator.insert(&key, page_number, page);
    }

    /// Drives a full page change against `source`, then prefetches the next
    /// page. Holding `&mut self` across the fetch serializes navigation.
    ///
    /// A jump past the accumulated run loads the missing pages in order
    /// first; the first of them that does not load ends the walk and its
    /// outcome is returned.
    pub async fn go_to_page<S>(&mut self, source: &S, page: usize) -> Navigation
    where
        S: ListingSource<Item = T>,
    {
        if self.accepts(page) {
            for gap in self.reachable_page()..page {
                let navigation = self.step_to(source, gap).await;
                if !matches!(
                    navigation,
                    Navigation::Cached | Navigation::Completed(Completion::Applied)
                ) {
                    return navigation;
                }
            }
        }
        self.step_to(source, page).await
    }

    async fn step_to<S>(&mut self, source: &S, page: usize) -> Navigation
    where
        S: ListingSource<Item = T>,
    {
        let navigation = match self.begin_page(page) {
            PageRequest::Ignored => return Navigation::Ignored,
            PageRequest::Cached => Navigation::Cached,
            PageRequest::Fetch(ticket) => {
                let result = source.fetch_page(&self.filter, ticket.page, self.limit).await;
                Navigation::Completed(self.complete(ticket, result))
            }
        };

        if matches!(
            navigation,
            Navigation::Cached | Navigation::Completed(Completion::Applied)
        ) {
            self.prefetch_next(source).await;
        }
        navigation
    }

    async fn prefetch_next<S>(&mut self, source: &S)
    where
        S: ListingSource<Item = T>,
    {
        if let Some(ticket) = self.prefetch_ticket() {
            let result = source.fetch_page(&self.filter, ticket.page, self.limit).await;
            self.complete(ticket, result);
        }
    }
}
