//! Feed drivers on top of the post store.

mod incremental;
mod live;

pub use incremental::{IncrementalFeed, LoadOutcome, SCROLL_THRESHOLD_PX, ScrollPosition};
pub use live::LiveFeed;
