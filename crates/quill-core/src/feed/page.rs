use std::num::NonZeroUsize;

use serde::Serialize;

use crate::domain::Post;

use super::filter::filter_posts;
use super::pagination::Pagination;
use super::search::SearchState;

/// Number of posts per feed page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Six cards, used by the compact home grid.
    pub const COMPACT: Self = Self(NonZeroUsize::new(6).unwrap());
    /// Twelve cards, used by the full listing.
    pub const STANDARD: Self = Self(NonZeroUsize::new(12).unwrap());

    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// Only the two layouts the feed renders are accepted from configuration.
    pub fn from_layout(size: usize) -> Option<Self> {
        match size {
            6 => Some(Self::COMPACT),
            12 => Some(Self::STANDARD),
            _ => None,
        }
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One rendered page of the filtered feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisiblePage {
    pub posts: Vec<Post>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl VisiblePage {
    /// True when nothing is shown, which renders as "no results".
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.total_pages)
    }
}

pub fn total_pages(matches: usize, page_size: PageSize) -> usize {
    matches.div_ceil(page_size.get())
}

/// Filter the snapshot with `search` and cut out the requested page.
///
/// Pure: the same snapshot, search state and page size always give the same
/// page. A page past the end yields an empty slice; clamping the request is
/// the pagination control's job.
pub fn compute_visible_page(
    snapshot: &[Post],
    search: &SearchState,
    page_size: PageSize,
) -> VisiblePage {
    let filtered = filter_posts(snapshot, search.query(), search.date_range());
    let size = page_size.get();
    let page = search.current_page();

    let start = (page - 1).saturating_mul(size).min(filtered.len());
    let end = start.saturating_add(size).min(filtered.len());

    VisiblePage {
        posts: filtered[start..end].iter().map(|p| (*p).clone()).collect(),
        page,
        total_pages: total_pages(filtered.len(), page_size),
        total_matches: filtered.len(),
    }
}
