//! Search and date predicates over posts.

use crate::domain::Post;

use super::search::DateRange;

/// Case-insensitive substring match on title or content. An empty query
/// matches every post.
pub fn matches_query(post: &Post, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    contains_folded(post, &needle)
}

fn contains_folded(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.content.to_lowercase().contains(needle)
}

/// Date predicate. With an active range a post without `created_at` never matches.
pub fn within_range(post: &Post, range: &DateRange) -> bool {
    if !range.is_active() {
        return true;
    }
    post.created_at.is_some_and(|t| range.contains(t))
}

/// Apply both predicates, preserving the snapshot order.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str, range: &DateRange) -> Vec<&'a Post> {
    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| needle.is_empty() || contains_folded(post, &needle))
        .filter(|post| within_range(post, range))
        .collect()
}
