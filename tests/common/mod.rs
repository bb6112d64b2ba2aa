//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use storefront_analytics::Transaction;

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Base instant for generated rows.
pub fn epoch() -> NaiveDateTime {
    at(2018, 1, 1, 0, 0)
}

/// Strategy for a single order item with occasionally missing fields.
pub fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (
        0u32..12,
        prop::option::weighted(0.9, 0u32..6),
        prop::option::weighted(0.95, 0u32..4),
        prop::option::weighted(0.85, 0u32..5),
        0i64..(14 * 24 * 60),
        prop::option::weighted(0.9, 0i64..50_000),
    )
        .prop_map(|(order, customer, city, category, minutes, cents)| Transaction {
            order_id: format!("order-{}", order),
            customer_id: customer.map(|c| format!("cust-{}", c)),
            customer_city: city.map(|c| format!("city-{}", c)),
            product_category_name: category.map(|c| format!("category-{}", c)),
            order_purchase_timestamp: epoch() + chrono::Duration::minutes(minutes),
            price: cents.map(|c| Decimal::new(c, 2)),
        })
}

pub fn transactions_strategy(max: usize) -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction_strategy(), 0..max)
}

/// Window strategy over the generated time span, start <= end.
pub fn window_bounds_strategy() -> impl Strategy<Value = (NaiveDateTime, NaiveDateTime)> {
    (0i64..(16 * 24 * 60), 0i64..(16 * 24 * 60)).prop_map(|(a, b)| {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        (
            epoch() - chrono::Duration::days(1) + chrono::Duration::minutes(lo),
            epoch() - chrono::Duration::days(1) + chrono::Duration::minutes(hi),
        )
    })
}
