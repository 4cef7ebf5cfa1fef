//! Document store implementations.

mod memory;

pub use memory::{Clock, InMemoryCommentStore, InMemoryMessageStore, InMemoryPostStore};

#[cfg(test)]
mod tests;
