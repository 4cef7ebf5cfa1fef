//! Account directory and reset code delivery.

mod memory;
mod notifier;

pub use memory::{DEFAULT_RESET_TTL_MINUTES, InMemoryAccountDirectory};
pub use notifier::{InMemoryOutbox, LoggingNotifier};
