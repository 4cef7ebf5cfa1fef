use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional inclusive creation-date window.
///
/// Only applied once both bounds are set; a half-open range filters nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds, when the range is active.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start.zip(self.end)
    }

    pub fn is_active(&self) -> bool {
        self.bounds().is_some()
    }

    /// Whether `instant` lies in `[start, end]`. Inactive ranges contain everything.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match self.bounds() {
            Some((start, end)) => start <= instant && instant <= end,
            None => true,
        }
    }
}

/// Transient search input for the post feed.
///
/// `current_page` is 1-based and returns to 1 whenever the query or the date
/// range is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    date_range: DateRange,
    current_page: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            date_range: DateRange::default(),
            current_page: 1,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.set_date_range(range);
        self
    }

    /// Request a page directly, without clamping. Page 0 reads as page 1.
    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.current_page = 1;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
        self.current_page = 1;
    }

    pub fn clear_date_range(&mut self) {
        self.set_date_range(DateRange::default());
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }
}
