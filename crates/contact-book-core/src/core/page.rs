// crates/contact-book-core/src/core/page.rs
// ============================================================================
// Module: Pagination
// Description: Page requests and paginated search results.
// Purpose: Keep page arithmetic in one place for every list and search path.
// Dependencies: crate::core::contact
// ============================================================================

//! ## Overview
//! [`PageRequest`] clamps caller input into a valid 1-based window and
//! [`SearchPage`] carries one window of records together with the total
//! match count.
//!
//! ## Invariants
//! - `page >= 1` and `page_size >= 1` for every constructed [`PageRequest`].
//! - `total_pages == ceil(total / page_size)`, and 0 when `total == 0`.
//! - `records.len() <= page_size`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::contact::ContactRecord;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Page size used when no explicit size is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// SECTION: Page Request
// ============================================================================

/// A validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page (>= 1).
    page: u32,
    /// Rows per page (>= 1).
    page_size: u32,
}

impl PageRequest {
    /// Builds a page request, clamping `page` and `page_size` up to 1.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Builds the first page with the given size.
    #[must_use]
    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Builds a page request from a raw query-string value.
    ///
    /// Missing, non-numeric, or out-of-range values resolve to page 1.
    #[must_use]
    pub fn from_query(raw_page: Option<&str>, page_size: u32) -> Self {
        let page = raw_page.and_then(|value| value.trim().parse::<u32>().ok()).unwrap_or(1);
        Self::new(page, page_size)
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Returns the number of rows to skip: `(page - 1) * page_size`.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1).saturating_mul(u64::from(self.page_size))
    }

    /// Returns the row limit for this window.
    #[must_use]
    pub fn limit(self) -> u64 {
        u64::from(self.page_size)
    }
}

// ============================================================================
// SECTION: Search Page
// ============================================================================

/// One window of contacts plus totals for the whole match set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    /// Records in natural store order.
    pub records: Vec<ContactRecord>,
    /// Count of matching records ignoring pagination.
    pub total: u64,
    /// Requested page (1-based).
    pub page: u32,
    /// Page size used for the window.
    pub page_size: u32,
    /// `ceil(total / page_size)`.
    pub total_pages: u64,
}

impl SearchPage {
    /// Assembles a page from a fetched window and the total match count.
    #[must_use]
    pub fn new(request: PageRequest, records: Vec<ContactRecord>, total: u64) -> Self {
        Self {
            records,
            total,
            page: request.page(),
            page_size: request.page_size(),
            total_pages: total_pages(total, request.page_size()),
        }
    }

    /// Returns true while a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Returns the next page number when one exists.
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        if self.has_next() { self.page.checked_add(1) } else { None }
    }
}

/// Computes `ceil(total / page_size)`; 0 when `total` is 0.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1)))
}
