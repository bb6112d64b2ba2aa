//! Dashboard views derived from the summary tables.
//!
//! Everything here re-orders or truncates a summary for display: headline
//! totals, best/worst categories, top cities and top customers per RFM
//! metric. `DashboardReport` bundles them and renders as plain text.

use std::cmp::Ordering;
use std::fmt;

use crate::pipeline::{PipelineConfig, Summaries};
use crate::precision::{format_currency, sum_money, Money};
use crate::types::{CategoryPerformance, CityDistribution, DailyOrders, RfmRow};
use crate::window::DateWindow;

/// Sum of distinct-order counts across all days.
pub fn total_orders(daily: &[DailyOrders]) -> usize {
    daily.iter().map(|d| d.order_count).sum()
}

/// Sum of revenue across all days.
pub fn total_revenue(daily: &[DailyOrders]) -> Money {
    sum_money(daily.iter().map(|d| d.revenue))
}

/// Head of the descending category summary.
pub fn best_categories(
    performance: &[CategoryPerformance],
    n: usize,
) -> Vec<CategoryPerformance> {
    performance.iter().take(n).cloned().collect()
}

/// Fewest items first; equal counts keep the summary's relative order.
pub fn worst_categories(
    performance: &[CategoryPerformance],
    n: usize,
) -> Vec<CategoryPerformance> {
    let mut ascending = performance.to_vec();
    ascending.sort_by_key(|c| c.item_count);
    ascending.truncate(n);
    ascending
}

/// Cities with the most distinct customers; ties by city name.
pub fn top_cities(distribution: &[CityDistribution], n: usize) -> Vec<CityDistribution> {
    let mut sorted = distribution.to_vec();
    sorted.sort_by(|a, b| {
        b.customer_count
            .cmp(&a.customer_count)
            .then_with(|| a.city.cmp(&b.city))
    });
    sorted.truncate(n);
    sorted
}

fn top_rfm_by<F>(rfm: &[RfmRow], n: usize, primary: F) -> Vec<RfmRow>
where
    F: Fn(&RfmRow, &RfmRow) -> Ordering,
{
    let mut sorted = rfm.to_vec();
    sorted.sort_by(|a, b| {
        primary(a, b)
            .then_with(|| a.customer_index.cmp(&b.customer_index))
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    sorted.truncate(n);
    sorted
}

/// Most recent customers first.
pub fn top_by_recency(rfm: &[RfmRow], n: usize) -> Vec<RfmRow> {
    top_rfm_by(rfm, n, |a, b| a.recency.cmp(&b.recency))
}

/// Customers with the most orders first.
pub fn top_by_frequency(rfm: &[RfmRow], n: usize) -> Vec<RfmRow> {
    top_rfm_by(rfm, n, |a, b| b.frequency.cmp(&a.frequency))
}

/// Highest spenders first.
pub fn top_by_monetary(rfm: &[RfmRow], n: usize) -> Vec<RfmRow> {
    top_rfm_by(rfm, n, |a, b| b.monetary.cmp(&a.monetary))
}

/// Presentation-ready bundle of headline figures and ranked views.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub window: DateWindow,
    pub total_orders: usize,
    pub total_revenue: Money,
    pub best_categories: Vec<CategoryPerformance>,
    pub worst_categories: Vec<CategoryPerformance>,
    pub top_cities: Vec<CityDistribution>,
    pub by_recency: Vec<RfmRow>,
    pub by_frequency: Vec<RfmRow>,
    pub by_monetary: Vec<RfmRow>,
    pub currency_symbol: String,
}

impl DashboardReport {
    pub fn build(summaries: &Summaries, config: &PipelineConfig) -> Self {
        Self {
            window: summaries.window,
            total_orders: total_orders(&summaries.daily_orders),
            total_revenue: total_revenue(&summaries.daily_orders),
            best_categories: best_categories(
                &summaries.category_performance,
                config.top_n_categories,
            ),
            worst_categories: worst_categories(
                &summaries.category_performance,
                config.top_n_categories,
            ),
            top_cities: top_cities(&summaries.city_distribution, config.top_n_cities),
            by_recency: top_by_recency(&summaries.rfm, config.top_n_customers),
            by_frequency: top_by_frequency(&summaries.rfm, config.top_n_customers),
            by_monetary: top_by_monetary(&summaries.rfm, config.top_n_customers),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    fn money(&self, amount: Money) -> String {
        format_currency(amount, &self.currency_symbol)
    }
}

impl fmt::Display for DashboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Window: {} .. {}",
            self.window.start.format("%Y-%m-%d %H:%M:%S"),
            self.window.end.format("%Y-%m-%d %H:%M:%S")
        )?;

        writeln!(f, "\n== Daily Orders ==")?;
        writeln!(f, "Total orders:  {}", self.total_orders)?;
        writeln!(f, "Total revenue: {}", self.money(self.total_revenue))?;

        writeln!(f, "\n== Best Performing Product Categories ==")?;
        for c in &self.best_categories {
            writeln!(f, "{:>8}  {}", c.item_count, c.category)?;
        }
        writeln!(f, "\n== Worst Performing Product Categories ==")?;
        for c in &self.worst_categories {
            writeln!(f, "{:>8}  {}", c.item_count, c.category)?;
        }

        writeln!(f, "\n== Customers by City ==")?;
        for c in &self.top_cities {
            writeln!(f, "{:>8}  {}", c.customer_count, c.city)?;
        }

        writeln!(f, "\n== RFM: By Recency (days) ==")?;
        for r in &self.by_recency {
            writeln!(f, "#{:<8} {:>8}", r.customer_index, r.recency)?;
        }
        writeln!(f, "\n== RFM: By Frequency ==")?;
        for r in &self.by_frequency {
            writeln!(f, "#{:<8} {:>8}", r.customer_index, r.frequency)?;
        }
        writeln!(f, "\n== RFM: By Monetary ==")?;
        for r in &self.by_monetary {
            writeln!(f, "#{:<8} {:>16}", r.customer_index, self.money(r.monetary))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn cat(name: &str, count: usize) -> CategoryPerformance {
        CategoryPerformance {
            category: name.to_string(),
            item_count: count,
        }
    }

    fn city(name: &str, count: usize) -> CityDistribution {
        CityDistribution {
            city: name.to_string(),
            customer_count: count,
        }
    }

    fn customer(
        id: &str,
        index: usize,
        recency: i64,
        frequency: usize,
        monetary: Decimal,
    ) -> RfmRow {
        RfmRow {
            customer_id: id.to_string(),
            frequency,
            monetary,
            customer_index: index,
            recency,
        }
    }

    #[test]
    fn test_totals() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let daily = vec![
            DailyOrders {
                day,
                order_count: 2,
                revenue: dec!(10.10),
            },
            DailyOrders {
                day: day.succ_opt().unwrap(),
                order_count: 0,
                revenue: Decimal::ZERO,
            },
            DailyOrders {
                day: day.succ_opt().unwrap().succ_opt().unwrap(),
                order_count: 3,
                revenue: dec!(0.20),
            },
        ];
        assert_eq!(total_orders(&daily), 5);
        assert_eq!(total_revenue(&daily), dec!(10.30));
    }

    #[test]
    fn test_best_and_worst_categories() {
        let perf = vec![cat("toys", 9), cat("books", 4), cat("auto", 1), cat("garden", 1)];

        let best = best_categories(&perf, 2);
        assert_eq!(best, vec![cat("toys", 9), cat("books", 4)]);

        let worst = worst_categories(&perf, 3);
        assert_eq!(worst, vec![cat("auto", 1), cat("garden", 1), cat("books", 4)]);
    }

    #[test]
    fn test_top_cities() {
        let dist = vec![city("a", 1), city("b", 5), city("c", 5), city("d", 2)];
        let top = top_cities(&dist, 3);
        assert_eq!(top, vec![city("b", 5), city("c", 5), city("d", 2)]);
    }

    #[test]
    fn test_rfm_views() {
        let rfm = vec![
            customer("c1", 3, 0, 1, dec!(50)),
            customer("c2", 1, 9, 4, dec!(10)),
            customer("c3", 2, 4, 2, dec!(80)),
        ];

        let ids = |rows: Vec<RfmRow>| -> Vec<String> {
            rows.into_iter().map(|r| r.customer_id).collect()
        };
        assert_eq!(ids(top_by_recency(&rfm, 2)), vec!["c1", "c3"]);
        assert_eq!(ids(top_by_frequency(&rfm, 2)), vec!["c2", "c3"]);
        assert_eq!(ids(top_by_monetary(&rfm, 5)), vec!["c3", "c1", "c2"]);
    }

    #[test]
    fn test_rfm_ties_break_on_index() {
        let rfm = vec![
            customer("z", 2, 1, 1, dec!(5)),
            customer("a", 1, 1, 1, dec!(5)),
        ];
        let top = top_by_recency(&rfm, 2);
        assert_eq!(top[0].customer_id, "a");
    }
}
