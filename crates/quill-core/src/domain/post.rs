use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner reference stored on a post at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub uid: String,
    pub email: String,
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Published,
    Draft,
}

/// Post entity - a blog post as stored by the document store.
///
/// Every field except `id` may be absent in a stored record. Missing text
/// fields read as empty, a missing author means the post has no owner, and a
/// missing `created_at` means the server timestamp was never resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: PostStatus,
}

impl Post {
    /// Whether `uid` is the stored owner of this post.
    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.author.as_ref().is_some_and(|a| a.uid == uid)
    }

    /// Author e-mail for display, empty when the post has no author.
    pub fn author_email(&self) -> &str {
        self.author.as_ref().map(|a| a.email.as_str()).unwrap_or("")
    }
}

/// Fields supplied by the user when creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: Author,
    pub status: PostStatus,
}

impl NewPost {
    pub fn published(author: Author, title: String, content: String) -> Self {
        Self {
            title,
            content,
            author,
            status: PostStatus::Published,
        }
    }
}

/// The editable subset of a post.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}
