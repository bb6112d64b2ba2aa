//! Category performance summary: order items sold per product category.

use std::collections::BTreeMap;

use crate::types::{CategoryPerformance, Transaction};

/// Count rows per category, most items first.
///
/// Rows without a category are ignored. Categories with equal counts are
/// ordered by name, ascending.
pub fn category_performance<'a, I>(rows: I) -> Vec<CategoryPerformance>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut counts: BTreeMap<&'a str, usize> = BTreeMap::new();
    for row in rows {
        if let Some(category) = row.product_category_name.as_deref() {
            *counts.entry(category).or_insert(0) += 1;
        }
    }

    let mut summary: Vec<CategoryPerformance> = counts
        .into_iter()
        .map(|(category, item_count)| CategoryPerformance {
            category: category.to_string(),
            item_count,
        })
        .collect();
    // Stable sort keeps the name order from the BTreeMap for ties
    summary.sort_by(|a, b| b.item_count.cmp(&a.item_count));
    summary
}
