//! Read-only transaction table.
//!
//! Rows are sorted ascending by purchase timestamp once, on construction,
//! and never change afterwards. Windows are applied with two binary searches.

use chrono::NaiveDateTime;

use crate::error::AnalyticsResult;
use crate::types::Transaction;
use crate::window::DateWindow;

/// The loaded transaction log, sorted by purchase timestamp.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    /// Build a table, sorting rows by purchase timestamp (stable).
    pub fn new(mut rows: Vec<Transaction>) -> Self {
        rows.sort_by_key(|row| row.order_purchase_timestamp);
        Self { rows }
    }

    /// All rows in timestamp order.
    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest purchase timestamp in the unfiltered table.
    pub fn min_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.first().map(|row| row.order_purchase_timestamp)
    }

    /// Latest purchase timestamp in the unfiltered table.
    pub fn max_timestamp(&self) -> Option<NaiveDateTime> {
        self.rows.last().map(|row| row.order_purchase_timestamp)
    }

    /// Window spanning the whole table; `None` for an empty table.
    pub fn full_window(&self) -> Option<DateWindow> {
        match (self.min_timestamp(), self.max_timestamp()) {
            (Some(start), Some(end)) => Some(DateWindow { start, end }),
            _ => None,
        }
    }

    /// Rows inside `window`, as a contiguous slice of the sorted table.
    pub fn filter(&self, window: &DateWindow) -> AnalyticsResult<&[Transaction]> {
        window.validate()?;
        let lo = self
            .rows
            .partition_point(|row| row.order_purchase_timestamp < window.start);
        let hi = self
            .rows
            .partition_point(|row| row.order_purchase_timestamp <= window.end);
        Ok(&self.rows[lo..hi.max(lo)])
    }
}
