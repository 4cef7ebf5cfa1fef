//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod store;

pub use auth::{
    AccountDirectory, AuthError, MIN_PASSWORD_LEN, PasswordService, ResetNotifier, TokenClaims,
    TokenService, validate_email, validate_password,
};
pub use store::{CommentStore, MessageStore, PostStore, Snapshots};
