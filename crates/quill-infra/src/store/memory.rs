//! In-memory document store with live snapshots.
//!
//! Stands in for the hosted document database. Each collection lives inside a
//! `watch` channel, so every write is a new snapshot for subscribers.
//! Note: data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use quill_core::StoreError;
use quill_core::domain::{
    ChatMessage, Comment, NewChatMessage, NewComment, NewPost, Post, PostUpdate,
};
use quill_core::feed::{Cursor, feed_order};
use quill_core::ports::{CommentStore, MessageStore, PostStore, Snapshots};

use crate::stream::{dedup, watch_stream};

/// Source of server timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Millisecond precision, the resolution of the cursor wire form.
fn system_clock() -> Clock {
    Arc::new(|| Utc::now().trunc_subsecs(3))
}

/// In-memory `posts` collection, kept in feed order.
pub struct InMemoryPostStore {
    posts: watch::Sender<Vec<Post>>,
    clock: Clock,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            posts: watch::channel(Vec::new()).0,
            clock,
        }
    }

    /// Import an existing record, keeping its id. Timestamps are cut to
    /// millisecond precision so cursors taken from it round-trip.
    pub fn insert(&self, mut post: Post) {
        post.created_at = post.created_at.map(|t| t.trunc_subsecs(3));
        post.updated_at = post.updated_at.map(|t| t.trunc_subsecs(3));
        self.posts.send_modify(|posts| {
            posts.retain(|p| p.id != post.id);
            posts.push(post);
            posts.sort_by(feed_order);
        });
    }

    pub fn len(&self) -> usize {
        self.posts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, new: NewPost) -> Result<Post, StoreError> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            author: Some(new.author),
            created_at: Some((self.clock)()),
            updated_at: None,
            status: new.status,
        };

        self.insert(post.clone());
        tracing::debug!(post_id = %post.id, "Post created");

        Ok(post)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.borrow().iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: &str, update: PostUpdate) -> Result<Post, StoreError> {
        let now = (self.clock)();
        let mut updated = None;

        self.posts.send_if_modified(|posts| {
            let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
                return false;
            };
            post.title = update.title;
            post.content = update.content;
            post.updated_at = Some(now);
            updated = Some(post.clone());
            true
        });

        let post = updated.ok_or(StoreError::NotFound)?;
        tracing::debug!(post_id = %id, "Post updated");
        Ok(post)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.posts.send_if_modified(|posts| {
            let before = posts.len();
            posts.retain(|p| p.id != id);
            posts.len() != before
        });

        if !removed {
            return Err(StoreError::NotFound);
        }
        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn list_by_author(&self, uid: &str) -> Result<Vec<Post>, StoreError> {
        Ok(self
            .posts
            .borrow()
            .iter()
            .filter(|p| p.is_owned_by(uid))
            .cloned()
            .collect())
    }

    fn subscribe(&self) -> Snapshots<Post> {
        watch_stream(self.posts.subscribe(), |posts: &Vec<Post>| posts.clone())
    }

    async fn fetch_page(
        &self,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.borrow();
        Ok(posts
            .iter()
            .filter(|p| cursor.is_none_or(|c| c.precedes(p)))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// In-memory `posts/{id}/comments` sub-collections.
pub struct InMemoryCommentStore {
    threads: watch::Sender<HashMap<String, Vec<Comment>>>,
    clock: Clock,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            threads: watch::channel(HashMap::new()).0,
            clock,
        }
    }
}

impl Default for InMemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn add(&self, post_id: &str, new: NewComment) -> Result<Comment, StoreError> {
        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            text: new.text,
            user_email: new.user_email,
            user_id: new.user_id,
            created_at: Some((self.clock)()),
        };

        self.threads.send_modify(|threads| {
            // Newest first; append-only, so inserting at the front keeps the order.
            threads
                .entry(post_id.to_string())
                .or_default()
                .insert(0, comment.clone());
        });
        tracing::debug!(post_id = %post_id, comment_id = %comment.id, "Comment added");

        Ok(comment)
    }

    async fn list(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .threads
            .borrow()
            .get(post_id)
            .cloned()
            .unwrap_or_default())
    }

    fn subscribe(&self, post_id: &str) -> Snapshots<Comment> {
        let post_id = post_id.to_string();
        dedup(watch_stream(self.threads.subscribe(), move |threads| {
            threads.get(&post_id).cloned().unwrap_or_default()
        }))
    }
}

/// In-memory `chatrooms/{room}/messages` collections.
pub struct InMemoryMessageStore {
    rooms: RwLock<HashMap<String, Vec<ChatMessage>>>,
    clock: Clock,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, room: &str, new: NewChatMessage) -> Result<ChatMessage, StoreError> {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            text: new.text,
            sender: new.sender,
            created_at: Some((self.clock)()),
        };

        self.rooms
            .write()
            .await
            .entry(room.to_string())
            .or_default()
            .push(message.clone());
        tracing::debug!(room = %room, message_id = %message.id, "Chat message stored");

        Ok(message)
    }

    async fn list(&self, room: &str) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self.rooms.read().await.get(room).cloned().unwrap_or_default())
    }
}
