//! Page-link windows for the paginated HTML tables.

use serde::Serialize;

use crate::domain::page::PageResult;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// How many links to keep at each end and around the current page.
#[derive(Debug, Clone, Copy)]
pub struct PageWindow {
    pub left_edge: usize,
    pub left_current: usize,
    pub right_current: usize,
    pub right_edge: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            left_edge: 2,
            left_current: 2,
            right_current: 4,
            right_edge: 2,
        }
    }
}

impl PageWindow {
    /// Page numbers to render; `None` marks an elided range.
    pub fn links(&self, total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
        if total_pages == 0 {
            return vec![];
        }

        let mut pages = Vec::new();

        let left_end = (1 + self.left_edge).min(total_pages + 1);
        pages.extend((1..left_end).map(Some));

        let mid_start = left_end.max(current_page.saturating_sub(self.left_current));
        let mid_end = (current_page + self.right_current + 1).min(total_pages + 1);
        if mid_start > left_end {
            pages.push(None);
        }
        pages.extend((mid_start..mid_end).map(Some));

        let right_start = mid_end.max(total_pages.saturating_sub(self.right_edge) + 1);
        if right_start > mid_end {
            pages.push(None);
        }
        pages.extend((right_start..=total_pages).map(Some));

        pages
    }
}

/// A page of items with the links a template needs to navigate.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_items: usize, per_page: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = total_items.div_ceil(per_page.max(1));

        Self {
            items,
            pages: PageWindow::default().links(total_pages, current_page),
            page: current_page,
            total_pages,
            total_items,
        }
    }
}

impl<T> From<PageResult<T>> for Paginated<T> {
    fn from(page: PageResult<T>) -> Self {
        let info = page.pagination;
        Self::new(
            page.items,
            info.current_page,
            info.total_items,
            info.items_per_page,
        )
    }
}
