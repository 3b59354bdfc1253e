use std::collections::HashSet;

use crate::dataset::TrafficTable;

/// The user's allow-lists.
///
/// `networks` is always applied, so "no filter" means passing every
/// available network. An empty `cities` list means no city restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub networks: Vec<String>,
    pub cities: Vec<String>,
}

impl Selection {
    pub fn new(networks: Vec<String>, cities: Vec<String>) -> Self {
        Self { networks, cities }
    }
}

pub fn apply_selection(table: &TrafficTable, selection: &Selection) -> TrafficTable {
    filter_rows(table, &selection.networks, &selection.cities)
}

/// Keeps rows whose network is allowed and, when `cities` is non-empty,
/// whose city is allowed too. Row order is preserved.
pub fn filter_rows(table: &TrafficTable, networks: &[String], cities: &[String]) -> TrafficTable {
    let networks = networks.iter().map(String::as_str).collect::<HashSet<_>>();
    let cities = cities.iter().map(String::as_str).collect::<HashSet<_>>();
    let records = table
        .records()
        .iter()
        .filter(|record| networks.contains(record.network.as_str()))
        .filter(|record| cities.is_empty() || cities.contains(record.city.as_str()))
        .cloned()
        .collect();
    table.with_records(records)
}
