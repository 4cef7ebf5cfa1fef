//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`: the
//! in-memory document store, the account directory, feed drivers and the
//! session context.
//!
//! ## Feature Flags
//!
//! - `auth` (default) - JWT + Argon2 token and password services

pub mod accounts;
pub mod feed;
pub mod mask;
pub mod session;
pub mod store;
mod stream;

#[cfg(feature = "auth")]
pub mod auth;

pub use accounts::{InMemoryAccountDirectory, InMemoryOutbox, LoggingNotifier};
pub use feed::{IncrementalFeed, LiveFeed, LoadOutcome, ScrollPosition};
pub use session::{Session, SessionContext};
pub use store::{InMemoryCommentStore, InMemoryMessageStore, InMemoryPostStore};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
