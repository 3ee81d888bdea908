//! Render-ready blog feed entries and feed-date handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Which collection a feed entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    /// Derived from a project's embedded blog content; hidden by the
    /// project's id.
    Project,
    /// A standalone article; hidden by its own id.
    Article,
}

/// One unified blog-feed entry, annotated for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub kind: FeedKind,
    /// The id visibility is keyed on: the project id for project posts,
    /// the article id for articles.
    pub id: String,
    /// Linked project, when any. May point at a project that was never
    /// loaded; consumers fall back to standalone rendering.
    pub project_id: Option<String>,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub content: String,
    pub image: String,
    pub hidden: bool,
}

/// Parses a free-text feed date for ordering.
///
/// Accepts RFC 3339, `YYYY-MM-DD`, `YYYY/MM/DD`, `Month D, YYYY` and
/// `D Month YYYY`. Anything else, including an empty string, maps to the
/// Unix epoch so that undated entries sort after every dated one in the
/// most-recent-first feed.
pub fn parse_feed_date(raw: &str) -> NaiveDateTime {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return stamp.naive_utc();
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_time(NaiveTime::MIN);
        }
    }
    NaiveDateTime::default()
}
