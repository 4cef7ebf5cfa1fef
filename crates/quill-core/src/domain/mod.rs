//! Domain entities - the core business objects.

mod avatar;
mod chat;
mod comment;
mod post;
mod user;

pub use avatar::AvatarColor;
pub use chat::{ChatMessage, ChatSender, GUEST_ROOM, NewChatMessage, chat_room};
pub use comment::{Comment, NewComment};
pub use post::{Author, NewPost, Post, PostStatus, PostUpdate};
pub use user::Identity;
