use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every listing page.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

impl PageInfo {
    pub fn new(current_page: usize, total_items: usize, items_per_page: usize) -> Self {
        let items_per_page = items_per_page.max(1);
        Self {
            current_page: current_page.max(1),
            total_pages: total_items.div_ceil(items_per_page),
            total_items,
            items_per_page,
        }
    }
}

/// One page of items plus its metadata.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, pagination: PageInfo) -> Self {
        Self { items, pagination }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
