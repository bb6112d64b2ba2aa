//! RFM (Recency / Frequency / Monetary) customer segmentation.
//!
//! Three passes:
//! 1. Fold rows into one accumulator per customer (latest purchase,
//!    distinct orders, total spend).
//! 2. Dense-rank the latest purchase timestamps, ascending.
//! 3. Measure recency in whole days against the window end date.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::types::{RfmRow, Transaction};

/// Dense ranking over a set of ordered values.
///
/// Equal values share a rank; consecutive distinct values get consecutive
/// ranks starting at 1.
#[derive(Debug, Clone)]
pub struct DenseRank<T> {
    sorted: Vec<T>,
}

impl<T: Ord> DenseRank<T> {
    pub fn new<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut sorted: Vec<T> = values.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self { sorted }
    }

    /// 1-based rank of `value`. A value never seen ranks at its
    /// insertion position.
    pub fn rank_of(&self, value: &T) -> usize {
        match self.sorted.binary_search(value) {
            Ok(i) | Err(i) => i + 1,
        }
    }
}

struct CustomerAccumulator<'a> {
    last_purchase: NaiveDateTime,
    orders: HashSet<&'a str>,
    monetary: Decimal,
}

impl<'a> CustomerAccumulator<'a> {
    fn new(first_seen: NaiveDateTime) -> Self {
        Self {
            last_purchase: first_seen,
            orders: HashSet::new(),
            monetary: Decimal::ZERO,
        }
    }

    fn record(&mut self, row: &'a Transaction) {
        self.last_purchase = self.last_purchase.max(row.order_purchase_timestamp);
        self.orders.insert(row.order_id.as_str());
        self.monetary += row.price_or_zero();
    }
}

/// Build one RFM row per customer, ordered by customer id.
///
/// `window_end` supplies the recency reference date (its date part). Recency
/// is signed and not clamped: a purchase after the reference date yields a
/// negative value. Rows without a customer id are skipped.
pub fn rfm<'a, I>(rows: I, window_end: NaiveDateTime) -> Vec<RfmRow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut customers: BTreeMap<&'a str, CustomerAccumulator<'a>> = BTreeMap::new();
    for row in rows {
        let Some(customer_id) = row.customer_id.as_deref() else {
            continue;
        };
        customers
            .entry(customer_id)
            .or_insert_with(|| CustomerAccumulator::new(row.order_purchase_timestamp))
            .record(row);
    }

    let ranks = DenseRank::new(customers.values().map(|acc| acc.last_purchase));
    let reference = window_end.date();

    customers
        .into_iter()
        .map(|(customer_id, acc)| RfmRow {
            customer_id: customer_id.to_string(),
            frequency: acc.orders.len(),
            monetary: acc.monetary,
            customer_index: ranks.rank_of(&acc.last_purchase),
            recency: reference
                .signed_duration_since(acc.last_purchase.date())
                .num_days(),
        })
        .collect()
}
