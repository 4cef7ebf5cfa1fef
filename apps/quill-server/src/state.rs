//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::feed::PageSize;
use quill_core::ports::{AccountDirectory, PasswordService, PostStore, ResetNotifier, TokenService};
use quill_core::services::{ChatService, PostService};
use quill_infra::{
    Argon2PasswordService, InMemoryAccountDirectory, InMemoryCommentStore, InMemoryMessageStore,
    InMemoryPostStore, JwtTokenService, LiveFeed, LoggingNotifier,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub chat: ChatService,
    pub accounts: Arc<dyn AccountDirectory>,
    pub tokens: Arc<dyn TokenService>,
    /// Latest snapshot of the posts collection, kept current by a background task.
    pub feed: Arc<LiveFeed>,
    pub page_size: PageSize,
}

impl AppState {
    /// Build the production state. Must run inside the server's runtime.
    pub fn new(config: &AppConfig) -> Self {
        Self::build(
            config,
            Arc::new(Argon2PasswordService::new()),
            Arc::new(LoggingNotifier),
        )
    }

    pub fn build(
        config: &AppConfig,
        passwords: Arc<dyn PasswordService>,
        notifier: Arc<dyn ResetNotifier>,
    ) -> Self {
        let post_store = Arc::new(InMemoryPostStore::new());
        let comment_store = Arc::new(InMemoryCommentStore::new());
        let feed = Arc::new(LiveFeed::spawn(post_store.subscribe()));

        let accounts = InMemoryAccountDirectory::new(passwords, notifier)
            .with_reset_ttl(config.reset_code_ttl);

        tracing::info!(
            page_size = config.feed_page_size.get(),
            "Application state initialized (in-memory store)"
        );

        Self {
            posts: PostService::new(post_store, comment_store),
            chat: ChatService::new(Arc::new(InMemoryMessageStore::new())),
            accounts: Arc::new(accounts),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            feed,
            page_size: config.feed_page_size,
        }
    }
}
