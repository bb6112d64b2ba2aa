//! Core data structures for storefront analytics.
//!
//! `Transaction` is the immutable input unit (one row per order item).
//! The remaining structs are the rows of the four summary tables.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// A single order item from the transaction log.
///
/// Grouping keys that can be absent in raw data are `Option`s; a row without
/// a key is left out of the grouping that needs it. A missing `price`
/// contributes zero to monetary sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Order identifier (shared by every item of the same order)
    pub order_id: String,
    /// Customer identifier
    pub customer_id: Option<String>,
    /// Customer city, free text
    pub customer_city: Option<String>,
    /// Product category label
    pub product_category_name: Option<String>,
    /// Purchase time; the only temporal anchor for windowing and recency
    pub order_purchase_timestamp: NaiveDateTime,
    /// Line item price
    pub price: Option<Decimal>,
}

impl Transaction {
    /// Create a transaction with only the required fields set.
    pub fn new(order_id: impl Into<String>, order_purchase_timestamp: NaiveDateTime) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: None,
            customer_city: None,
            product_category_name: None,
            order_purchase_timestamp,
            price: None,
        }
    }

    /// Set the customer and their city.
    pub fn with_customer(
        mut self,
        customer_id: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.customer_id = Some(customer_id.into());
        self.customer_city = Some(city.into());
        self
    }

    /// Set the product category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category_name = Some(category.into());
        self
    }

    /// Set the line item price.
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Calendar day of the purchase.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }

    /// Price, with a missing value counted as zero.
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

/// One calendar day of order activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyOrders {
    pub day: NaiveDate,
    /// Distinct orders placed that day
    pub order_count: usize,
    /// Sum of item prices that day
    pub revenue: Decimal,
}

/// Number of order items sold in one product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPerformance {
    pub category: String,
    pub item_count: usize,
}

/// Number of distinct customers observed in one city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDistribution {
    pub city: String,
    pub customer_count: usize,
}

/// Recency / Frequency / Monetary figures for one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RfmRow {
    pub customer_id: String,
    /// Distinct orders in the window
    pub frequency: usize,
    /// Total spend in the window
    pub monetary: Decimal,
    /// Dense rank (1-based) of the customer's latest purchase, ascending
    pub customer_index: usize,
    /// Whole days from the latest purchase date to the window end date.
    /// Negative when the purchase is after the window end.
    pub recency: i64,
}
