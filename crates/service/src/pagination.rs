//! Pagination utilities for service layer
//!
//! Page numbers are 0-based; missing values fall back to page 0 of size 3.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page_number: u32,
    /// items per page
    pub page_size: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE_NUMBER: u32 = 0;
    pub const DEFAULT_PAGE_SIZE: u32 = 3;

    /// Build from optional request values, filling defaults for missing ones.
    pub fn from_parts(page_number: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page_number: page_number.unwrap_or(Self::DEFAULT_PAGE_NUMBER),
            page_size: page_size.unwrap_or(Self::DEFAULT_PAGE_SIZE),
        }
    }

    /// Number of items to skip before the page starts.
    pub fn offset(self) -> usize {
        (self.page_number as usize).saturating_mul(self.page_size as usize)
    }

    /// Slice an already ordered collection down to this page.
    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page_number: Self::DEFAULT_PAGE_NUMBER, page_size: Self::DEFAULT_PAGE_SIZE }
    }
}
