//! Page requests and page responses shared by repositories and services.

use serde::Serialize;

/// Items returned per page when the caller does not specify a size.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// A request for one bounded slice of a result set. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// One page of results together with total-count metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(content: Vec<T>, page: usize, per_page: usize, total_elements: usize) -> Self {
        Self {
            content,
            page,
            per_page,
            total_elements,
            total_pages: total_elements.div_ceil(per_page.max(1)),
        }
    }
}
