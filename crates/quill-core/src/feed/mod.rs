//! Post feed: search, date filtering and pagination over live snapshots.

mod aggregator;
mod cursor;
mod filter;
mod page;
mod pagination;
mod search;

pub use aggregator::FeedAggregator;
pub use cursor::{Cursor, CursorError, feed_order};
pub use filter::{filter_posts, matches_query, within_range};
pub use page::{PageSize, VisiblePage, compute_visible_page, total_pages};
pub use pagination::Pagination;
pub use search::{DateRange, SearchState};
