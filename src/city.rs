//! City distribution summary: distinct customers per city.

use std::collections::{BTreeMap, HashSet};

use crate::types::{CityDistribution, Transaction};

/// Count distinct customers per city, ordered by city name.
///
/// Every city with at least one row is returned; a row without a customer
/// id still registers its city but adds no customer.
pub fn city_distribution<'a, I>(rows: I) -> Vec<CityDistribution>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut cities: BTreeMap<&'a str, HashSet<&'a str>> = BTreeMap::new();
    for row in rows {
        let Some(city) = row.customer_city.as_deref() else {
            continue;
        };
        let customers = cities.entry(city).or_default();
        if let Some(customer_id) = row.customer_id.as_deref() {
            customers.insert(customer_id);
        }
    }

    cities
        .into_iter()
        .map(|(city, customers)| CityDistribution {
            city: city.to_string(),
            customer_count: customers.len(),
        })
        .collect()
}
