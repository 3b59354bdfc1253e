//! The five dashboard aggregations.
//!
//! Each function reads a filtered [`TrafficTable`] and returns a new summary;
//! none mutate their input and all of them return an empty result for an
//! empty table. Grouped results are keyed in sorted order before ranking,
//! and ranking sorts are stable so ties keep their table order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    dataset::{StationRecord, TrafficTable},
    schema::CanonicalField,
    stats::{self, BoxStats},
};

pub const HIERARCHY_ROW_LIMIT: usize = 100;
pub const TOP_STATION_LIMIT: usize = 15;
pub const CITY_GROUP_LIMIT: usize = 30;

/// Summed traffic for one path through a hierarchy, outermost level first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTotal {
    pub path: Vec<String>,
    pub traffic: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub traffic: i64,
}

fn ranked_by_traffic(records: &[StationRecord]) -> Vec<&StationRecord> {
    let mut ranked = records.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.traffic.cmp(&a.traffic));
    ranked
}

/// The rows feeding the hierarchy: at most [`HIERARCHY_ROW_LIMIT`] of the
/// busiest stations, busiest first.
pub fn hierarchy_source(table: &TrafficTable) -> Vec<&StationRecord> {
    let mut ranked = ranked_by_traffic(table.records());
    ranked.truncate(HIERARCHY_ROW_LIMIT);
    ranked
}

/// Network → City → Station totals over the busiest stations (sunburst).
pub fn hierarchy(table: &TrafficTable) -> Vec<PathTotal> {
    let mut groups: BTreeMap<[&str; 3], i64> = BTreeMap::new();
    for record in hierarchy_source(table) {
        let key = [
            record.network.as_str(),
            record.city.as_str(),
            record.station.as_str(),
        ];
        let total = groups.entry(key).or_insert(0);
        *total = total.saturating_add(record.traffic);
    }
    groups
        .into_iter()
        .map(|(key, traffic)| PathTotal {
            path: key.iter().map(|level| level.to_string()).collect(),
            traffic,
        })
        .collect()
}

/// The `limit` busiest stations, ordered ascending so the busiest is last.
pub fn top_stations(table: &TrafficTable, limit: usize) -> Vec<StationRecord> {
    let mut ranked = ranked_by_traffic(table.records());
    ranked.truncate(limit);
    ranked.into_iter().rev().cloned().collect()
}

/// Total traffic per network, one row per network present (share of total).
pub fn network_shares(table: &TrafficTable) -> Vec<GroupTotal> {
    let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
    for record in table.records() {
        let total = groups.entry(record.network.as_str()).or_insert(0);
        *total = total.saturating_add(record.traffic);
    }
    groups
        .into_iter()
        .map(|(key, traffic)| GroupTotal {
            key: key.to_string(),
            traffic,
        })
        .collect()
}

/// The filtered rows as-is, grouped by network only when read.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Distribution<'a> {
    group_by: CanonicalField,
    records: &'a [StationRecord],
}

impl<'a> Distribution<'a> {
    pub fn group_by(&self) -> CanonicalField {
        self.group_by
    }

    pub fn records(&self) -> &'a [StationRecord] {
        self.records
    }

    /// Traffic values per network, networks in sorted order.
    pub fn series(&self) -> BTreeMap<&'a str, Vec<i64>> {
        let mut series: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
        for record in self.records {
            series
                .entry(record.network.as_str())
                .or_default()
                .push(record.traffic);
        }
        series
    }

    pub fn box_stats(&self) -> Vec<BoxStats> {
        self.series()
            .into_iter()
            .filter_map(|(network, values)| stats::box_stats(network, &values))
            .collect()
    }
}

pub fn distribution(table: &TrafficTable) -> Distribution<'_> {
    Distribution {
        group_by: CanonicalField::Network,
        records: table.records(),
    }
}

/// Total traffic per (city, network), keeping the `limit` largest (treemap).
pub fn city_network_totals(table: &TrafficTable, limit: usize) -> Vec<PathTotal> {
    let mut groups: BTreeMap<[&str; 2], i64> = BTreeMap::new();
    for record in table.records() {
        let key = [record.city.as_str(), record.network.as_str()];
        let total = groups.entry(key).or_insert(0);
        *total = total.saturating_add(record.traffic);
    }
    let mut totals = groups
        .into_iter()
        .map(|(key, traffic)| PathTotal {
            path: key.iter().map(|level| level.to_string()).collect(),
            traffic,
        })
        .collect::<Vec<_>>();
    totals.sort_by(|a, b| b.traffic.cmp(&a.traffic));
    totals.truncate(limit);
    totals
}
