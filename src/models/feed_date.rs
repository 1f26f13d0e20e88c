//! Tolerant date values as they arrive on the roster and exit feeds.
//!
//! Upstream feeds are not validated before they reach the engine, so a date
//! field may hold anything. [`FeedDate`] keeps unparseable values instead of
//! rejecting the whole feed, letting the reconstructor skip just that record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A calendar date captured from an upstream feed.
///
/// ISO `YYYY-MM-DD` strings land in [`FeedDate::Date`]; other strings are
/// kept verbatim in [`FeedDate::Raw`] and interpreted lazily by
/// [`FeedDate::resolve`]. Non-string JSON (numbers, booleans, objects,
/// arrays) is held in [`FeedDate::Other`] and never resolves.
///
/// # Example
///
/// ```
/// use retention_engine::models::FeedDate;
/// use chrono::NaiveDate;
///
/// let iso: FeedDate = serde_json::from_str("\"2020-01-01\"").unwrap();
/// assert_eq!(iso.resolve(), NaiveDate::from_ymd_opt(2020, 1, 1));
///
/// let stamped: FeedDate = serde_json::from_str("\"2020-01-01T09:30:00Z\"").unwrap();
/// assert_eq!(stamped.resolve(), NaiveDate::from_ymd_opt(2020, 1, 1));
///
/// let garbage: FeedDate = serde_json::from_str("\"last tuesday\"").unwrap();
/// assert_eq!(garbage.resolve(), None);
///
/// let numeric: FeedDate = serde_json::from_str("20200101").unwrap();
/// assert_eq!(numeric.resolve(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedDate {
    /// A well-formed ISO calendar date.
    Date(NaiveDate),
    /// The value exactly as the feed supplied it.
    Raw(String),
    /// A value that is not a string at all.
    Other(serde_json::Value),
}

impl FeedDate {
    /// Returns the calendar date this value denotes, if it can be determined.
    ///
    /// Raw values are accepted as ISO dates (surrounding whitespace ignored),
    /// RFC 3339 timestamps, or naive `YYYY-MM-DDTHH:MM:SS` timestamps. Timestamps
    /// resolve to the calendar date as written, not shifted to UTC.
    pub fn resolve(&self) -> Option<NaiveDate> {
        match self {
            FeedDate::Date(date) => Some(*date),
            FeedDate::Raw(raw) => parse_raw(raw.trim()),
            FeedDate::Other(_) => None,
        }
    }

    /// Returns the original textual form of the value.
    pub fn as_text(&self) -> String {
        match self {
            FeedDate::Date(date) => date.to_string(),
            FeedDate::Raw(raw) => raw.clone(),
            FeedDate::Other(value) => value.to_string(),
        }
    }
}

impl From<NaiveDate> for FeedDate {
    fn from(date: NaiveDate) -> Self {
        FeedDate::Date(date)
    }
}

fn parse_raw(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|stamp| stamp.date())
}
