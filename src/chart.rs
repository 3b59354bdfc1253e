//! Declarative chart descriptions handed to a rendering backend.
//!
//! The crate never draws anything. Each view pairs a [`ChartSpec`] (kind,
//! field roles, palette, title) with the aggregated data it describes, and a
//! [`Renderer`] turns that pair into whatever figure type it produces.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    aggregate::{self, Distribution, GroupTotal, PathTotal},
    cli::ViewKind,
    dataset::{StationRecord, TrafficTable},
    schema::CanonicalField,
};

/// Network colours shared by every chart.
pub const NETWORK_COLORS: &[(&str, &str)] = &[
    ("Métro", "#00A59B"),
    ("RER", "#E3051C"),
    ("Tramway", "#708D81"),
    ("Val", "#009099"),
    ("Inconnu", "#95A5A6"),
    ("Autre", "#95A5A6"),
];

pub fn color_map() -> BTreeMap<&'static str, &'static str> {
    NETWORK_COLORS.iter().copied().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Sunburst,
    Bar,
    Pie,
    Box,
    Treemap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<CanonicalField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<CanonicalField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<CanonicalField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<CanonicalField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names: Option<CanonicalField>,
    pub color: CanonicalField,
    pub color_map: BTreeMap<&'static str, &'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    /// Sort categories by ascending total along the category axis.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ascending_categories: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub outlier_points: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub log_y: bool,
}

impl ChartSpec {
    fn base(kind: ChartKind, title: &'static str) -> Self {
        Self {
            kind,
            title,
            path: Vec::new(),
            x: None,
            y: None,
            values: None,
            names: None,
            color: CanonicalField::Network,
            color_map: color_map(),
            orientation: None,
            ascending_categories: false,
            hole: None,
            outlier_points: false,
            log_y: false,
        }
    }

    pub fn for_view(view: ViewKind) -> Self {
        match view {
            ViewKind::Sunburst => Self {
                path: vec![
                    CanonicalField::Network,
                    CanonicalField::City,
                    CanonicalField::Station,
                ],
                values: Some(CanonicalField::Traffic),
                ..Self::base(ChartKind::Sunburst, "Répartition Hiérarchique (Zoomable)")
            },
            ViewKind::TopStations => Self {
                x: Some(CanonicalField::Traffic),
                y: Some(CanonicalField::Station),
                orientation: Some(Orientation::Horizontal),
                ascending_categories: true,
                ..Self::base(ChartKind::Bar, "Top 15 Stations")
            },
            ViewKind::Share => Self {
                values: Some(CanonicalField::Traffic),
                names: Some(CanonicalField::Network),
                hole: Some(0.6),
                ..Self::base(ChartKind::Pie, "Part du Trafic par Réseau")
            },
            ViewKind::Distribution => Self {
                x: Some(CanonicalField::Network),
                y: Some(CanonicalField::Traffic),
                outlier_points: true,
                log_y: true,
                ..Self::base(ChartKind::Box, "Dispersion du Trafic (Échelle Log)")
            },
            ViewKind::Treemap => Self {
                path: vec![CanonicalField::City, CanonicalField::Network],
                values: Some(CanonicalField::Traffic),
                ..Self::base(ChartKind::Treemap, "Top Villes par Volume")
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChartData<'a> {
    Paths(Vec<PathTotal>),
    Stations(Vec<StationRecord>),
    Groups(Vec<GroupTotal>),
    Distribution(Distribution<'a>),
}

impl ChartData<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Paths(rows) => rows.is_empty(),
            ChartData::Stations(rows) => rows.is_empty(),
            ChartData::Groups(rows) => rows.is_empty(),
            ChartData::Distribution(view) => view.records().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartView<'a> {
    pub view: ViewKind,
    pub spec: ChartSpec,
    pub data: ChartData<'a>,
}

impl<'a> ChartView<'a> {
    /// Aggregates `table` for `view` and attaches the matching spec.
    pub fn build(view: ViewKind, table: &'a TrafficTable) -> Self {
        let data = match view {
            ViewKind::Sunburst => ChartData::Paths(aggregate::hierarchy(table)),
            ViewKind::TopStations => ChartData::Stations(aggregate::top_stations(
                table,
                aggregate::TOP_STATION_LIMIT,
            )),
            ViewKind::Share => ChartData::Groups(aggregate::network_shares(table)),
            ViewKind::Distribution => ChartData::Distribution(aggregate::distribution(table)),
            ViewKind::Treemap => ChartData::Paths(aggregate::city_network_totals(
                table,
                aggregate::CITY_GROUP_LIMIT,
            )),
        };
        Self {
            view,
            spec: ChartSpec::for_view(view),
            data,
        }
    }
}

/// A backend that turns a chart view into a figure.
pub trait Renderer {
    type Figure;

    fn render(&self, view: &ChartView<'_>) -> Result<Self::Figure>;
}

/// Serializes views as JSON documents for an external charting front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    type Figure = String;

    fn render(&self, view: &ChartView<'_>) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(view)
        } else {
            serde_json::to_string(view)
        };
        rendered.with_context(|| format!("Serializing {:?} view", view.view))
    }
}
