//! Date window filtering.
//!
//! A `DateWindow` is an inclusive `[start, end]` range of purchase timestamps.
//! The window is validated before any row is filtered; an inverted window
//! fails with `InvalidRange` and nothing is returned.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::Transaction;

/// Timestamp layouts accepted from data files and command line arguments.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of purchase timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Which end of a window a parsed bound belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBound {
    Start,
    End,
}

impl DateWindow {
    /// Create a validated window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> AnalyticsResult<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    /// Window covering exactly one instant.
    pub fn instant(at: NaiveDateTime) -> Self {
        Self { start: at, end: at }
    }

    /// Parse both bounds from text. A date-only start means midnight,
    /// a date-only end means the last instant of that day.
    pub fn parse(start: &str, end: &str) -> AnalyticsResult<Self> {
        Self::new(
            parse_bound(start, WindowBound::Start)?,
            parse_bound(end, WindowBound::End)?,
        )
    }

    /// Check `start <= end`.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.start > self.end {
            return Err(AnalyticsError::invalid_range(self.start, self.end));
        }
        Ok(())
    }

    /// Whether `at` lies inside the window, both ends included.
    #[inline]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Date part of the upper bound; the reference date for recency.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

/// Keep the rows whose purchase timestamp lies inside `window`.
///
/// Row order is preserved and the input is not touched. Works on any row
/// order; `TransactionTable::filter` is the faster path for sorted tables.
pub fn filter<'a, I>(rows: I, window: &DateWindow) -> AnalyticsResult<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    window.validate()?;
    Ok(rows
        .into_iter()
        .filter(|row| window.contains(row.order_purchase_timestamp))
        .collect())
}

/// Parse a timestamp in one of the accepted layouts.
///
/// Date-only values resolve to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse one end of a window supplied as text.
pub fn parse_bound(value: &str, bound: WindowBound) -> AnalyticsResult<NaiveDateTime> {
    let trimmed = value.trim();
    if bound == WindowBound::End {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return date
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .ok_or_else(|| AnalyticsError::invalid_timestamp(value));
        }
    }
    parse_timestamp(trimmed).ok_or_else(|| AnalyticsError::invalid_timestamp(value))
}
