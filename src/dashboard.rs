//! One interaction's worth of derived data.
//!
//! Every selection change re-runs the filter and all five aggregations
//! against the already-loaded table; nothing here is cached.

use serde::Serialize;

use crate::{
    chart::ChartView,
    cli::ViewKind,
    dataset::{StationRecord, TrafficTable},
    filter::Selection,
    schema::CanonicalField,
    summary::{self, Kpis},
};

/// Builds the selection the shell would submit: no networks chosen means
/// every network in the table.
pub fn resolve_selection(
    table: &TrafficTable,
    networks: Vec<String>,
    cities: Vec<String>,
) -> Selection {
    let networks = if networks.is_empty() {
        summary::available_networks(table)
    } else {
        networks
    };
    Selection::new(networks, cities)
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub columns: Vec<CanonicalField>,
    pub kpis: Kpis,
    pub views: Vec<ChartView<'a>>,
    pub detail: Vec<StationRecord>,
}

impl<'a> Dashboard<'a> {
    pub fn build(filtered: &'a TrafficTable) -> Self {
        Self {
            columns: filtered.columns().to_vec(),
            kpis: Kpis::compute(filtered),
            views: ViewKind::ALL
                .into_iter()
                .map(|view| ChartView::build(view, filtered))
                .collect(),
            detail: summary::detail_listing(filtered),
        }
    }

    pub fn view(&self, kind: ViewKind) -> Option<&ChartView<'a>> {
        self.views.iter().find(|view| view.view == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply_selection;

    fn record(network: &str, station: &str, city: &str, traffic: i64) -> StationRecord {
        StationRecord {
            network: network.to_string(),
            station: station.to_string(),
            traffic,
            city: city.to_string(),
            district: None,
        }
    }

    fn sample() -> TrafficTable {
        TrafficTable::new(
            CanonicalField::ALL[..4].to_vec(),
            vec![
                record("Métro", "Nation", "Paris", 10),
                record("RER", "Auber", "Paris", 20),
                record("Tramway", "Épinay", "Épinay-Sur-Seine", 5),
            ],
        )
    }

    #[test]
    fn resolve_selection_defaults_to_every_network() {
        let table = sample();
        let selection = resolve_selection(&table, Vec::new(), Vec::new());
        assert_eq!(selection.networks, vec!["Métro", "RER", "Tramway"]);
        assert_eq!(apply_selection(&table, &selection).len(), 3);
    }

    #[test]
    fn dashboard_contains_every_view() {
        let table = sample();
        let dashboard = Dashboard::build(&table);
        assert_eq!(dashboard.views.len(), ViewKind::ALL.len());
        assert!(dashboard.view(ViewKind::Treemap).is_some());
        assert_eq!(dashboard.kpis.top_station.as_deref(), Some("Auber"));
        assert_eq!(dashboard.detail[0].station, "Auber");
    }
}
