//! Document store ports.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::{ChatMessage, Comment, NewChatMessage, NewComment, NewPost, Post, PostUpdate};
use crate::error::StoreError;
use crate::feed::Cursor;

/// Live query results. Every item is the complete current result set,
/// replacing whatever was received before. The first item is the state at
/// subscription time.
pub type Snapshots<T> = BoxStream<'static, Vec<T>>;

/// Post collection, ordered newest first.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post; the store assigns the id and creation timestamp.
    async fn create(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError>;

    /// Replace title and content, stamping `updated_at`.
    async fn update(&self, id: &str, update: PostUpdate) -> Result<Post, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Posts owned by `uid`, newest first.
    async fn list_by_author(&self, uid: &str) -> Result<Vec<Post>, StoreError>;

    /// Subscribe to the whole collection.
    fn subscribe(&self) -> Snapshots<Post>;

    /// One-shot page query: up to `limit` posts ordered after `cursor`.
    async fn fetch_page(
        &self,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<Post>, StoreError>;
}

/// Comments sub-collection of each post, ordered newest first.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn add(&self, post_id: &str, comment: NewComment) -> Result<Comment, StoreError>;

    async fn list(&self, post_id: &str) -> Result<Vec<Comment>, StoreError>;

    fn subscribe(&self, post_id: &str) -> Snapshots<Comment>;
}

/// Per-room chat logs, oldest message first.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append to `room`; the store assigns the id and server timestamp.
    async fn append(&self, room: &str, message: NewChatMessage) -> Result<ChatMessage, StoreError>;

    async fn list(&self, room: &str) -> Result<Vec<ChatMessage>, StoreError>;
}
