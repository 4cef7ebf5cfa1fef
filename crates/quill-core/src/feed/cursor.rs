//! Feed ordering and page cursors.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::Post;

/// Feed order: newest first, posts without a timestamp last, ties broken by id
/// (descending) so the order is total.
pub fn feed_order(a: &Post, b: &Post) -> Ordering {
    compare_keys((a.created_at, &a.id), (b.created_at, &b.id))
}

fn compare_keys(a: (Option<DateTime<Utc>>, &str), b: (Option<DateTime<Utc>>, &str)) -> Ordering {
    let by_time = match (a.0, b.0) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| b.1.cmp(a.1))
}

/// Position of the last post of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub created_at: Option<DateTime<Utc>>,
    pub id: String,
}

impl Cursor {
    pub fn after(post: &Post) -> Self {
        Self {
            created_at: post.created_at,
            id: post.id.clone(),
        }
    }

    /// Whether `post` sorts strictly after this cursor in feed order.
    pub fn precedes(&self, post: &Post) -> bool {
        compare_keys((self.created_at, &self.id), (post.created_at, &post.id)) == Ordering::Less
    }
}

/// Wire form: `<unix millis>:<id>`, with an empty millis part for untimestamped posts.
impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.created_at {
            Some(t) => write!(f, "{}:{}", t.timestamp_millis(), self.id),
            None => write!(f, ":{}", self.id),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Malformed cursor: {0}")]
pub struct CursorError(String);

impl FromStr for Cursor {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (millis, id) = s
            .split_once(':')
            .ok_or_else(|| CursorError(s.to_string()))?;
        if id.is_empty() {
            return Err(CursorError(s.to_string()));
        }

        let created_at = if millis.is_empty() {
            None
        } else {
            let millis: i64 = millis.parse().map_err(|_| CursorError(s.to_string()))?;
            Some(DateTime::from_timestamp_millis(millis).ok_or_else(|| CursorError(s.to_string()))?)
        };

        Ok(Self {
            created_at,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(id: &str, ts: Option<i64>) -> Post {
        Post {
            id: id.to_string(),
            title: String::new(),
            content: String::new(),
            author: None,
            created_at: ts.and_then(|s| Utc.timestamp_opt(s, 0).single()),
            updated_at: None,
            status: Default::default(),
        }
    }

    #[test]
    fn test_feed_order_newest_first_untimestamped_last() {
        let mut posts = vec![
            post("old", Some(1)),
            post("none", None),
            post("new", Some(3)),
            post("mid", Some(2)),
        ];
        posts.sort_by(feed_order);

        let ids: Vec<_> = posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old", "none"]);
    }

    #[test]
    fn test_cursor_precedes_later_posts_only() {
        let cursor = Cursor::after(&post("b", Some(2)));

        assert!(cursor.precedes(&post("c", Some(1))));
        assert!(cursor.precedes(&post("a", Some(2))));
        assert!(cursor.precedes(&post("z", None)));
        assert!(!cursor.precedes(&post("b", Some(2))));
        assert!(!cursor.precedes(&post("x", Some(3))));
    }

    #[test]
    fn test_wire_form() {
        let cursor = Cursor::after(&post("abc", Some(1_700_000_000)));
        let encoded = cursor.to_string();
        assert_eq!(encoded, "1700000000000:abc");
        assert_eq!(encoded.parse::<Cursor>().unwrap(), cursor);

        let untimed: Cursor = ":xyz".parse().unwrap();
        assert_eq!(untimed.created_at, None);
        assert_eq!(untimed.id, "xyz");

        assert!("garbage".parse::<Cursor>().is_err());
        assert!("12:".parse::<Cursor>().is_err());
        assert!("abc:id".parse::<Cursor>().is_err());
    }
}
