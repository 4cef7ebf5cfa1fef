use std::ops::RangeInclusive;

use serde::Serialize;

/// Numbered pager state: which pages exist and where navigation may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// The pager is hidden when there is at most one page.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }

    pub fn pages(&self) -> RangeInclusive<usize> {
        1..=self.total
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<usize> {
        self.has_previous().then(|| self.clamp(self.current - 1))
    }

    pub fn next(&self) -> Option<usize> {
        self.has_next().then(|| self.current + 1)
    }

    /// Bring a requested page into `1..=max(total, 1)`.
    pub fn clamp(&self, requested: usize) -> usize {
        requested.clamp(1, self.total.max(1))
    }
}
