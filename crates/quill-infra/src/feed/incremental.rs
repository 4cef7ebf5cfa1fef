//! Cursor-driven incremental loading ("infinite scroll").

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quill_core::StoreError;
use quill_core::domain::Post;
use quill_core::feed::{Cursor, PageSize};
use quill_core::ports::PostStore;

/// Distance from the bottom of the content, in pixels, that triggers the
/// next fetch.
pub const SCROLL_THRESHOLD_PX: f64 = 300.0;

/// Scroll geometry reported by the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollPosition {
    pub fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.content_height - threshold
    }
}

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched; `added` records were new.
    Loaded { added: usize },
    /// Another fetch is already in flight.
    Busy,
    /// The store has no more records.
    Exhausted,
    /// The viewport is not close enough to the bottom.
    NotNearBottom,
}

#[derive(Default)]
struct LoaderState {
    posts: Vec<Post>,
    seen: HashSet<String>,
    cursor: Option<Cursor>,
    has_more: bool,
    loading: bool,
}

/// Clears the loading flag when the fetch completes or is cancelled.
struct LoadingGuard<'a> {
    state: &'a Mutex<LoaderState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).loading = false;
    }
}

fn lock(state: &Mutex<LoaderState>) -> MutexGuard<'_, LoaderState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Accumulating feed that pulls fixed-size pages after a cursor.
#[derive(Clone)]
pub struct IncrementalFeed {
    store: Arc<dyn PostStore>,
    page_size: PageSize,
    state: Arc<Mutex<LoaderState>>,
}

impl IncrementalFeed {
    pub fn new(store: Arc<dyn PostStore>, page_size: PageSize) -> Self {
        Self {
            store,
            page_size,
            state: Arc::new(Mutex::new(LoaderState {
                has_more: true,
                ..Default::default()
            })),
        }
    }

    /// Fetch the next page, unless one is already in flight or the feed is
    /// exhausted. A failed fetch leaves the cursor and `has_more` untouched.
    pub async fn load_more(&self) -> Result<LoadOutcome, StoreError> {
        let cursor = {
            let mut state = lock(&self.state);
            if state.loading {
                return Ok(LoadOutcome::Busy);
            }
            if !state.has_more {
                return Ok(LoadOutcome::Exhausted);
            }
            state.loading = true;
            state.cursor.clone()
        };
        let _guard = LoadingGuard { state: &self.state };

        let limit = self.page_size.get();
        let page = self.store.fetch_page(cursor.as_ref(), limit).await?;

        let mut state = lock(&self.state);
        let received = page.len();
        if let Some(last) = page.last() {
            state.cursor = Some(Cursor::after(last));
        }
        let mut added = 0;
        for post in page {
            if state.seen.insert(post.id.clone()) {
                state.posts.push(post);
                added += 1;
            }
        }
        state.has_more = received >= limit;

        tracing::debug!(received, added, has_more = state.has_more, "Feed page loaded");
        Ok(LoadOutcome::Loaded { added })
    }

    /// Load the next page when the viewport is within
    /// [`SCROLL_THRESHOLD_PX`] of the bottom.
    pub async fn on_scroll(&self, position: ScrollPosition) -> Result<LoadOutcome, StoreError> {
        if !position.near_bottom(SCROLL_THRESHOLD_PX) {
            return Ok(LoadOutcome::NotNearBottom);
        }
        self.load_more().await
    }

    pub fn posts(&self) -> Vec<Post> {
        lock(&self.state).posts.clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.state).posts.len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.state).posts.is_empty()
    }

    pub fn has_more(&self) -> bool {
        lock(&self.state).has_more
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn cursor(&self) -> Option<Cursor> {
        lock(&self.state).cursor.clone()
    }
}
