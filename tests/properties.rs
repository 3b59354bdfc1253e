use std::collections::HashSet;

use proptest::prelude::*;

use station_traffic::{
    aggregate,
    dataset::{StationRecord, TrafficTable},
    filter,
    normalize::{self, OTHER_NETWORK, UNKNOWN_CITY},
    schema::{CanonicalField, SchemaMapping, normalize_header},
};

const NETWORKS: &[&str] = &["Métro", "RER", "Tramway", "Val", "Autre"];
const CITIES: &[&str] = &["Paris", "Puteaux", "Saint-Denis", "Inconnue"];

fn record_strategy() -> impl Strategy<Value = StationRecord> {
    (
        prop::sample::select(NETWORKS),
        "[A-Z]{3,8}",
        0i64..50_000_000,
        prop::sample::select(CITIES),
    )
        .prop_map(|(network, station, traffic, city)| StationRecord {
            network: network.to_string(),
            station,
            traffic,
            city: city.to_string(),
            district: None,
        })
}

fn table_strategy() -> impl Strategy<Value = TrafficTable> {
    proptest::collection::vec(record_strategy(), 0..250)
        .prop_map(|records| TrafficTable::new(CanonicalField::ALL[..4].to_vec(), records))
}

fn subset(values: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(values.to_vec(), 0..=values.len())
        .prop_map(|picked| picked.into_iter().map(str::to_string).collect())
}

proptest! {
    #[test]
    fn traffic_is_never_negative(raw in "\\PC{0,16}") {
        prop_assert!(normalize::clean_traffic(Some(raw.as_str())) >= 0);
    }

    #[test]
    fn traffic_ignores_interior_whitespace(value in 0i64..1_000_000_000, gap in "[ \t\u{a0}]{0,3}") {
        let digits = value.to_string();
        let (head, tail) = digits.split_at(digits.len() / 2);
        let spaced = format!("{head}{gap}{tail}");
        prop_assert_eq!(normalize::clean_traffic(Some(spaced.as_str())), value);
    }

    #[test]
    fn categorical_fields_are_never_blank_when_missing(raw in prop::option::of("[a-zA-Z -]{0,12}")) {
        let city = normalize::clean_city(raw.as_deref());
        let network = normalize::clean_network(raw.as_deref());
        if raw.as_deref().is_none_or(normalize::is_missing) {
            prop_assert_eq!(city, UNKNOWN_CITY);
            prop_assert_eq!(network, OTHER_NETWORK);
        } else {
            prop_assert_eq!(city.chars().count(), raw.as_deref().unwrap_or_default().chars().count());
            prop_assert!(!network.contains("Metro"));
        }
    }

    #[test]
    fn schema_inference_is_deterministic(headers in proptest::collection::vec("[a-zé _]{1,16}", 0..8)) {
        let normalized = headers.iter().map(|h| normalize_header(h)).collect::<Vec<_>>();
        let first = SchemaMapping::infer(&normalized);
        prop_assert_eq!(&first, &SchemaMapping::infer(&normalized));

        let claimed = CanonicalField::ALL
            .iter()
            .filter_map(|field| first.column_index(*field))
            .collect::<Vec<_>>();
        let distinct = claimed.iter().collect::<HashSet<_>>();
        prop_assert_eq!(claimed.len(), distinct.len());
    }

    #[test]
    fn filter_keeps_only_allowed_rows(
        table in table_strategy(),
        networks in subset(NETWORKS),
        cities in subset(CITIES),
    ) {
        let filtered = filter::filter_rows(&table, &networks, &cities);
        for record in filtered.records() {
            prop_assert!(networks.contains(&record.network));
            if !cities.is_empty() {
                prop_assert!(cities.contains(&record.city));
            }
        }
        let expected = table
            .records()
            .iter()
            .filter(|r| networks.contains(&r.network))
            .filter(|r| cities.is_empty() || cities.contains(&r.city))
            .count();
        prop_assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn aggregations_respect_limits_and_totals(table in table_strategy()) {
        let shares = aggregate::network_shares(&table);
        let share_total: i64 = shares.iter().map(|s| s.traffic).sum();
        prop_assert_eq!(share_total, table.total_traffic());
        let distinct = table.records().iter().map(|r| r.network.as_str()).collect::<HashSet<_>>();
        prop_assert_eq!(shares.len(), distinct.len());

        let top = aggregate::top_stations(&table, aggregate::TOP_STATION_LIMIT);
        prop_assert!(top.len() <= aggregate::TOP_STATION_LIMIT);
        prop_assert!(top.windows(2).all(|pair| pair[0].traffic <= pair[1].traffic));
        for record in &top {
            prop_assert!(table.records().contains(record));
        }

        prop_assert!(aggregate::hierarchy_source(&table).len() <= aggregate::HIERARCHY_ROW_LIMIT);
        let hierarchy_total: i64 = aggregate::hierarchy(&table).iter().map(|p| p.traffic).sum();
        let source_total: i64 = aggregate::hierarchy_source(&table).iter().map(|r| r.traffic).sum();
        prop_assert_eq!(hierarchy_total, source_total);

        let treemap = aggregate::city_network_totals(&table, aggregate::CITY_GROUP_LIMIT);
        prop_assert!(treemap.len() <= aggregate::CITY_GROUP_LIMIT);
        prop_assert!(treemap.windows(2).all(|pair| pair[0].traffic >= pair[1].traffic));

        prop_assert_eq!(aggregate::distribution(&table).records().len(), table.len());
    }
}
