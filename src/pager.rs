//! Pagination cursor for the card grid

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    /// Pages rendered so far, starting at 1
    page: usize,
    total: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self { page_size: page_size.max(1), page: 1, total: 0 }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// New filtered set: back to page 1
    pub fn reset(&mut self, total: usize) {
        self.page = 1;
        self.total = total;
    }

    pub fn displayed(&self) -> usize {
        self.page.saturating_mul(self.page_size).min(self.total)
    }

    pub fn has_more(&self) -> bool {
        self.displayed() < self.total
    }

    /// Advance one page, returning the newly exposed slice of the filtered set
    pub fn load_more(&mut self) -> Option<Range<usize>> {
        if !self.has_more() {
            return None;
        }
        let start = self.displayed();
        self.page += 1;
        Some(start..self.displayed())
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
