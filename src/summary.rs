//! Scalar indicators, selectable options, and the detail listing shown
//! alongside the charts.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::dataset::{StationRecord, TrafficTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_traffic: i64,
    pub station_count: usize,
    pub top_station: Option<String>,
    pub mean_traffic: Option<f64>,
}

impl Kpis {
    pub fn compute(table: &TrafficTable) -> Self {
        let records = table.records();
        let total_traffic = table.total_traffic();
        // First row wins among equal maxima.
        let top_station = records
            .iter()
            .fold(None::<&StationRecord>, |best, record| match best {
                Some(current) if current.traffic >= record.traffic => Some(current),
                _ => Some(record),
            })
            .map(|record| record.station.clone());
        let mean_traffic =
            (!records.is_empty()).then(|| total_traffic as f64 / records.len() as f64);
        Self {
            total_traffic,
            station_count: records.len(),
            top_station,
            mean_traffic,
        }
    }
}

/// Formats a whole number with spaces between thousands: `1 200 000`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx).is_multiple_of(3) {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(mean) => format_thousands(mean.round() as i64),
        None => "-".to_string(),
    }
}

/// Distinct networks in first-appearance order.
pub fn available_networks(table: &TrafficTable) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .filter(|record| seen.insert(record.network.as_str()))
        .map(|record| record.network.clone())
        .collect()
}

/// Distinct cities, sorted.
pub fn available_cities(table: &TrafficTable) -> Vec<String> {
    table
        .records()
        .iter()
        .map(|record| record.city.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Rows sorted by traffic, busiest first.
pub fn detail_listing(table: &TrafficTable) -> Vec<StationRecord> {
    let mut rows = table.records().to_vec();
    rows.sort_by(|a, b| b.traffic.cmp(&a.traffic));
    rows
}
