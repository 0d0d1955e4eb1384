//! Shared offset pagination helpers.

use serde::Serialize;

pub const MAX_PER_PAGE: u32 = 100;

/// A validated page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Build a request from untrusted inputs: pages below one snap to the first page and page
    /// sizes outside `1..=MAX_PER_PAGE` fall back to `default_per_page`.
    pub fn normalize(page: Option<i64>, per_page: Option<i64>, default_per_page: u32) -> Self {
        let page = match page {
            Some(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
            _ => 1,
        };
        let per_page = match per_page {
            Some(value) if (1..=i64::from(MAX_PER_PAGE)).contains(&value) => value as u32,
            _ => default_per_page.clamp(1, MAX_PER_PAGE),
        };
        Self { page, per_page }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// Pagination metadata reported alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_num: Option<u32>,
    pub next_num: Option<u32>,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: u64) -> Self {
        let per_page = u64::from(request.per_page);
        let pages = total.div_ceil(per_page);
        let has_prev = request.page > 1;
        let has_next = u64::from(request.page) * per_page < total;

        Self {
            page: request.page,
            per_page: request.per_page,
            total,
            pages,
            has_prev,
            has_next,
            prev_num: has_prev.then(|| request.page - 1),
            next_num: has_next.then(|| request.page + 1),
        }
    }
}

/// One page of items together with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> OffsetPage<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> OffsetPage<U> {
        OffsetPage {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
