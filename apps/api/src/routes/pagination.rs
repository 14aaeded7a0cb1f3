//! Pagination envelope for list endpoints.
//!
//! A page beyond the end clamps to the last page rather than erroring, so
//! clients that over-shoot after a refresh still get data.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

/// Caller-requested page coordinates, already clamped to sane bounds.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: u32,
    pub size: usize,
}

impl PageParams {
    pub fn new(page: Option<u32>, size: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// One page of items plus bookkeeping for clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub size: usize,
    pub pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slices `items` into the requested page.
pub fn paginate<T: Clone>(items: &[T], params: PageParams) -> PageResponse<T> {
    let total = items.len();
    let size = params.size.max(1);
    let pages = total.div_ceil(size);

    let page = if pages == 0 {
        1
    } else {
        (params.page as usize).min(pages).max(1) as u32
    };

    let start = (page as usize - 1) * size;
    let end = (start + size).min(total);
    let page_items = if start < total {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageResponse {
        items: page_items,
        total,
        page,
        size,
        pages,
        has_next: (page as usize) < pages,
        has_prev: page > 1 && pages > 0,
    }
}
