//! Pagination and sort direction types.

use serde::{Deserialize, Serialize};

/// Number of items on every directory page (mentors, meetings, spheres).
pub const PAGE_SIZE: u64 = 6;

/// Generic sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sort {
    Desc,
    Asc,
}

/// 1-based page number for list endpoints. Page size is fixed at [`PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl PageRequest {
    pub fn new(page: u64) -> Self {
        Self { page }.clamped()
    }

    /// Clamp `page` to ≥ 1.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
        }
    }

    /// Zero-based index as used by the database paginator.
    pub fn index(self) -> u64 {
        self.clamped().page - 1
    }

    /// Row offset of the first item, `None` when it does not fit in `u64`.
    pub fn offset(self) -> Option<u64> {
        self.index().checked_mul(PAGE_SIZE)
    }

    /// Whether this page exists for a result set with `total_pages` pages.
    ///
    /// The first page always exists, even when the result set is empty.
    pub fn is_within(self, total_pages: u64) -> bool {
        let page = self.clamped().page;
        page == 1 || page <= total_pages
    }
}

/// One page of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.clamped().page,
            total_items,
            total_pages: total_items.div_ceil(PAGE_SIZE),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
