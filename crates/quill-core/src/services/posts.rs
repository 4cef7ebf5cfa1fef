//! Post and comment use cases, including the owner-only guard.

use std::sync::Arc;

use crate::domain::{Author, Comment, Identity, NewComment, NewPost, Post, PostUpdate};
use crate::error::DomainError;
use crate::ports::{CommentStore, PostStore};

/// Require a signed-in caller.
pub fn require_identity(identity: Option<&Identity>) -> Result<&Identity, DomainError> {
    identity.ok_or(DomainError::Unauthorized)
}

/// Require that the caller is the stored author of `post`.
///
/// Posts without an author belong to nobody and cannot be modified.
pub fn ensure_owner<'a>(
    identity: Option<&'a Identity>,
    post: &Post,
) -> Result<&'a Identity, DomainError> {
    let identity = require_identity(identity)?;
    if post.is_owned_by(&identity.uid) {
        Ok(identity)
    } else {
        Err(DomainError::Forbidden("post"))
    }
}

fn require_fields(title: &str, content: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(DomainError::Validation("All fields are required".to_string()));
    }
    Ok(())
}

/// Post service. Ownership checks happen here, next to the store, rather than
/// in whichever client issued the request.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, comments: Arc<dyn CommentStore>) -> Self {
        Self { posts, comments }
    }

    pub fn posts(&self) -> &Arc<dyn PostStore> {
        &self.posts
    }

    pub async fn create(
        &self,
        identity: Option<&Identity>,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        let identity = require_identity(identity)?;
        require_fields(&title, &content)?;

        let author = Author {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
        };
        Ok(self
            .posts
            .create(NewPost::published(author, title, content))
            .await?)
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Post",
                id: id.to_string(),
            })
    }

    /// Load a post for its edit form; only the author may open it.
    pub async fn get_for_edit(
        &self,
        identity: Option<&Identity>,
        id: &str,
    ) -> Result<Post, DomainError> {
        require_identity(identity)?;
        let post = self.get(id).await?;
        ensure_owner(identity, &post)?;
        Ok(post)
    }

    pub async fn edit(
        &self,
        identity: Option<&Identity>,
        id: &str,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        self.get_for_edit(identity, id).await?;
        require_fields(&title, &content)?;
        Ok(self.posts.update(id, PostUpdate { title, content }).await?)
    }

    pub async fn delete(&self, identity: Option<&Identity>, id: &str) -> Result<(), DomainError> {
        self.get_for_edit(identity, id).await?;
        Ok(self.posts.delete(id).await?)
    }

    /// The caller's own posts, newest first.
    pub async fn mine(&self, identity: Option<&Identity>) -> Result<Vec<Post>, DomainError> {
        let identity = require_identity(identity)?;
        Ok(self.posts.list_by_author(&identity.uid).await?)
    }

    pub async fn add_comment(
        &self,
        identity: Option<&Identity>,
        post_id: &str,
        text: String,
    ) -> Result<Comment, DomainError> {
        let identity = require_identity(identity)?;
        if text.trim().is_empty() {
            return Err(DomainError::Validation("Comment cannot be empty".to_string()));
        }
        self.get(post_id).await?;

        let comment = NewComment {
            text,
            user_email: identity.email.clone(),
            user_id: identity.uid.clone(),
        };
        Ok(self.comments.add(post_id, comment).await?)
    }

    pub async fn comments(&self, post_id: &str) -> Result<Vec<Comment>, DomainError> {
        self.get(post_id).await?;
        Ok(self.comments.list(post_id).await?)
    }
}
