//! Live feed driver.
//!
//! Consumes the store's snapshot stream on a background task and keeps the
//! latest snapshot available for synchronous reads. Dropping the handle stops
//! the task.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use quill_core::domain::Post;
use quill_core::feed::{FeedAggregator, PageSize, SearchState, VisiblePage, compute_visible_page};
use quill_core::ports::Snapshots;

/// Owning handle for a live post subscription.
pub struct LiveFeed {
    latest: watch::Receiver<Arc<[Post]>>,
    task: JoinHandle<()>,
}

impl LiveFeed {
    /// Start consuming `snapshots`. Must be called inside a tokio runtime.
    pub fn spawn(mut snapshots: Snapshots<Post>) -> Self {
        let (tx, latest) = watch::channel::<Arc<[Post]>>(Arc::from(Vec::new()));

        let task = tokio::spawn(async move {
            while let Some(posts) = snapshots.next().await {
                tracing::debug!(count = posts.len(), "Feed snapshot received");
                if tx.send(posts.into()).is_err() {
                    break;
                }
            }
            tracing::debug!("Feed subscription ended");
        });

        Self { latest, task }
    }

    /// Latest snapshot received.
    pub fn snapshot(&self) -> Arc<[Post]> {
        self.latest.borrow().clone()
    }

    /// Visible page for `search` over the latest snapshot.
    pub fn page(&self, search: &SearchState, page_size: PageSize) -> VisiblePage {
        compute_visible_page(&self.latest.borrow(), search, page_size)
    }

    /// Aggregator seeded with the latest snapshot.
    pub fn aggregator(&self, page_size: PageSize) -> FeedAggregator {
        let mut aggregator = FeedAggregator::new(page_size);
        aggregator.apply_snapshot(self.snapshot());
        aggregator
    }

    /// Watch raw snapshots as they arrive.
    pub fn watch(&self) -> watch::Receiver<Arc<[Post]>> {
        self.latest.clone()
    }

    /// Wait until the latest snapshot satisfies `predicate`.
    /// Returns `None` once the subscription has ended without a match.
    pub async fn wait_until<F>(&self, mut predicate: F) -> Option<Arc<[Post]>>
    where
        F: FnMut(&[Post]) -> bool,
    {
        let mut rx = self.latest.clone();
        rx.wait_for(|posts| predicate(posts))
            .await
            .ok()
            .map(|posts| posts.clone())
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use quill_core::domain::{Author, NewPost};
    use quill_core::ports::PostStore;

    use crate::store::InMemoryPostStore;

    fn new_post(title: &str) -> NewPost {
        NewPost::published(
            Author {
                uid: "u1".into(),
                email: "u1@example.com".into(),
            },
            title.to_string(),
            "body".to_string(),
        )
    }

    #[tokio::test]
    async fn test_tracks_latest_snapshot() {
        let store = InMemoryPostStore::new();
        store.create(new_post("Next.js guide")).await.unwrap();
        let feed = LiveFeed::spawn(store.subscribe());

        feed.wait_until(|posts| posts.len() == 1).await.unwrap();
        store.create(new_post("Cooking tips")).await.unwrap();
        feed.wait_until(|posts| posts.len() == 2).await.unwrap();

        let search = SearchState::new().with_query("next");
        let page = feed.page(&search, PageSize::STANDARD);
        assert_eq!(page.total_matches, 1);
        assert_eq!(page.posts[0].title, "Next.js guide");

        let aggregator = feed.aggregator(PageSize::COMPACT);
        assert_eq!(aggregator.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_ends_with_the_store() {
        let store = InMemoryPostStore::new();
        let feed = LiveFeed::spawn(store.subscribe());
        drop(store);

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            feed.wait_until(|posts| !posts.is_empty()),
        )
        .await
        .unwrap();
        assert!(outcome.is_none());
    }
}
