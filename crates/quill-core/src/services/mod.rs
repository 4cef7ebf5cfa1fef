//! Use cases composed from the ports.

mod chat;
mod posts;

pub use chat::ChatService;
pub use posts::{PostService, ensure_owner, require_identity};
