//! Daily orders summary: distinct orders and revenue per calendar day.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{DailyOrders, Transaction};

#[derive(Default)]
struct DayBucket<'a> {
    orders: HashSet<&'a str>,
    revenue: Decimal,
}

/// Resample rows to daily granularity.
///
/// Every day between the earliest and latest purchase date appears exactly
/// once, ascending; days without activity carry zero counts. No rows in,
/// no days out.
pub fn daily_orders<'a, I>(rows: I) -> Vec<DailyOrders>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<NaiveDate, DayBucket<'a>> = BTreeMap::new();
    for row in rows {
        let bucket = buckets.entry(row.purchase_date()).or_default();
        bucket.orders.insert(row.order_id.as_str());
        bucket.revenue += row.price_or_zero();
    }

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| match buckets.get(&day) {
            Some(bucket) => DailyOrders {
                day,
                order_count: bucket.orders.len(),
                revenue: bucket.revenue,
            },
            None => DailyOrders {
                day,
                order_count: 0,
                revenue: Decimal::ZERO,
            },
        })
        .collect()
}
