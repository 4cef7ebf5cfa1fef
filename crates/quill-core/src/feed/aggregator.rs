use std::sync::Arc;

use crate::domain::Post;

use super::filter::filter_posts;
use super::page::{PageSize, VisiblePage, compute_visible_page, total_pages};
use super::search::{DateRange, SearchState};

/// Derived view over the live post collection.
///
/// Holds the last full snapshot and the search state; every read recomputes the
/// page from those two, so a new snapshot or a new search is reflected
/// immediately.
#[derive(Debug, Clone)]
pub struct FeedAggregator {
    snapshot: Arc<[Post]>,
    search: SearchState,
    page_size: PageSize,
}

impl FeedAggregator {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            snapshot: Arc::from(Vec::new()),
            search: SearchState::new(),
            page_size,
        }
    }

    /// Replace the snapshot. The requested page is kept as is.
    pub fn apply_snapshot(&mut self, posts: impl Into<Arc<[Post]>>) {
        self.snapshot = posts.into();
    }

    pub fn snapshot(&self) -> &[Post] {
        &self.snapshot
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.search.set_date_range(range);
    }

    pub fn clear_date_range(&mut self) {
        self.search.clear_date_range();
    }

    /// Move to `page`, clamped to the pages that currently exist. Returns the
    /// page actually selected.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let matches = filter_posts(&self.snapshot, self.search.query(), self.search.date_range());
        let total = total_pages(matches.len(), self.page_size);
        let page = page.clamp(1, total.max(1));
        self.search.set_page(page);
        page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.search.current_page().saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.search.current_page().saturating_sub(1))
    }

    pub fn visible_page(&self) -> VisiblePage {
        compute_visible_page(&self.snapshot, &self.search, self.page_size)
    }
}
