//! The canonical in-memory table.
//!
//! A [`TrafficTable`] is built once by the loader and treated as immutable
//! afterwards; filters and aggregators borrow it and produce new tables or
//! summaries. The empty table (no columns, no rows) is the loader's only
//! failure signal.

use serde::Serialize;

use crate::{
    normalize,
    schema::{CanonicalField, SchemaMapping},
};

/// One station row with every canonical field already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    pub network: String,
    pub station: String,
    pub traffic: i64,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
}

impl StationRecord {
    /// Builds a record from a decoded source row.
    ///
    /// Fields absent from `mapping` fall back the same way as missing cells.
    /// `District` stays `None` when no header resolved to it or the cell is
    /// missing.
    pub fn from_raw(mapping: &SchemaMapping, raw: &[String]) -> Self {
        let cell = |field: CanonicalField| {
            mapping
                .column_index(field)
                .and_then(|idx| raw.get(idx))
                .map(String::as_str)
        };
        Self {
            network: normalize::clean_network(cell(CanonicalField::Network)),
            station: cell(CanonicalField::Station).unwrap_or_default().to_string(),
            traffic: normalize::clean_traffic(cell(CanonicalField::Traffic)),
            city: normalize::clean_city(cell(CanonicalField::City)),
            district: cell(CanonicalField::District)
                .filter(|value| !normalize::is_missing(value))
                .map(str::to_string),
        }
    }

    pub fn value(&self, field: CanonicalField) -> Option<String> {
        match field {
            CanonicalField::Network => Some(self.network.clone()),
            CanonicalField::Station => Some(self.station.clone()),
            CanonicalField::Traffic => Some(self.traffic.to_string()),
            CanonicalField::City => Some(self.city.clone()),
            CanonicalField::District => self.district.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrafficTable {
    columns: Vec<CanonicalField>,
    records: Vec<StationRecord>,
}

impl TrafficTable {
    pub fn new(columns: Vec<CanonicalField>, records: Vec<StationRecord>) -> Self {
        Self { columns, records }
    }

    /// The "no data available" table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Canonical fields resolved from the source headers.
    pub fn columns(&self) -> &[CanonicalField] {
        &self.columns
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() || self.columns.is_empty()
    }

    /// Derives a table sharing this table's columns.
    pub fn with_records(&self, records: Vec<StationRecord>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    pub fn total_traffic(&self) -> i64 {
        saturating_total(self.records.iter().map(|record| record.traffic))
    }
}

/// Sums traffic counts, pinning at `i64::MAX` instead of overflowing.
pub fn saturating_total(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::normalize_header;

    fn mapping_for(headers: &[&str]) -> SchemaMapping {
        let normalized = headers
            .iter()
            .map(|h| normalize_header(h))
            .collect::<Vec<_>>();
        SchemaMapping::infer(&normalized)
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn from_raw_normalizes_reference_row() {
        let mapping = mapping_for(&["Réseau", "Station", "Trafic (Validations)", "Ville"]);
        let record = StationRecord::from_raw(
            &mapping,
            &row(&["Metro", "Nation", "1 200 000", "paris"]),
        );
        assert_eq!(
            record,
            StationRecord {
                network: "Métro".to_string(),
                station: "Nation".to_string(),
                traffic: 1_200_000,
                city: "Paris".to_string(),
                district: None,
            }
        );
    }

    #[test]
    fn from_raw_applies_fallbacks_for_unmapped_fields() {
        let mapping = mapping_for(&["Station"]);
        let record = StationRecord::from_raw(&mapping, &row(&["Auber"]));
        assert_eq!(record.network, normalize::OTHER_NETWORK);
        assert_eq!(record.city, normalize::UNKNOWN_CITY);
        assert_eq!(record.traffic, 0);
        assert_eq!(record.district, None);
    }

    #[test]
    fn from_raw_keeps_district_text() {
        let mapping = mapping_for(&["Station", "Arrondissement pour Paris"]);
        let record = StationRecord::from_raw(&mapping, &row(&["Gare de Lyon", "12"]));
        assert_eq!(record.district.as_deref(), Some("12"));
        assert_eq!(record.value(CanonicalField::District).as_deref(), Some("12"));
    }

    #[test]
    fn empty_table_has_no_columns_or_rows() {
        let table = TrafficTable::empty();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.total_traffic(), 0);
    }

    #[test]
    fn total_traffic_saturates_on_extreme_counts() {
        let mapping = mapping_for(&["Station", "Trafic"]);
        let records = [["A", "1e300"], ["B", "1e300"], ["C", "5"]]
            .iter()
            .map(|cells| StationRecord::from_raw(&mapping, &row(cells)))
            .collect::<Vec<_>>();
        assert_eq!(records[0].traffic, i64::MAX);
        let table = TrafficTable::new(mapping.fields(), records);
        assert_eq!(table.total_traffic(), i64::MAX);
    }
}
