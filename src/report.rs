//! Command handlers: load, filter, aggregate, and print.

use std::{fmt::Write as _, path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use log::info;

use crate::{
    cache::TableCache,
    chart::{ChartData, ChartView, JsonRenderer, Renderer},
    cli::{self, ChartArgs, OptionsArgs, OutputFormat, ReportArgs, SelectionArgs},
    dashboard::{self, Dashboard},
    dataset::{StationRecord, TrafficTable, saturating_total},
    filter,
    loader::DatasetLoader,
    schema::CanonicalField,
    summary::{self, format_mean, format_thousands},
    table::{Align, render_table},
};

fn load_source(input: &Path) -> Result<Arc<TrafficTable>> {
    let mut loader = DatasetLoader::new(input, TableCache::default());
    let table = loader.load();
    if table.is_empty() {
        bail!("Données introuvables : {}", input.display());
    }
    Ok(table)
}

fn filtered_view(table: &TrafficTable, selection: &SelectionArgs) -> TrafficTable {
    let selection = dashboard::resolve_selection(
        table,
        cli::normalize_selection(&selection.networks),
        cli::normalize_selection(&selection.cities),
    );
    filter::apply_selection(table, &selection)
}

pub fn execute_report(args: &ReportArgs) -> Result<()> {
    let table = load_source(&args.source.input)?;
    let filtered = filtered_view(&table, &args.selection);
    let dashboard = Dashboard::build(&filtered);
    match args.format {
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&dashboard).context("Serializing dashboard")?;
            println!("{rendered}");
        }
        OutputFormat::Table => {
            print!("{}", render_dashboard(&dashboard, args.rows)?);
        }
    }
    info!(
        "Reported {} of {} row(s) from {:?}",
        filtered.len(),
        table.len(),
        args.source.input
    );
    Ok(())
}

pub fn execute_chart(args: &ChartArgs) -> Result<()> {
    let table = load_source(&args.source.input)?;
    let filtered = filtered_view(&table, &args.selection);
    let view = ChartView::build(args.view, &filtered);
    let rendered = JsonRenderer {
        pretty: args.pretty,
    }
    .render(&view)?;
    println!("{rendered}");
    Ok(())
}

pub fn execute_options(args: &OptionsArgs) -> Result<()> {
    let table = load_source(&args.source.input)?;
    let networks = summary::available_networks(&table);
    let cities = summary::available_cities(&table);
    let rows = networks
        .iter()
        .map(|network| vec!["network".to_string(), network.clone()])
        .chain(cities.iter().map(|city| vec!["city".to_string(), city.clone()]))
        .collect::<Vec<_>>();
    let headers = vec!["field".to_string(), "value".to_string()];
    print!("{}", render_table(&headers, &rows, &[]));
    info!(
        "Listed {} network(s) and {} city(ies)",
        networks.len(),
        cities.len()
    );
    Ok(())
}

pub fn render_dashboard(dashboard: &Dashboard<'_>, detail_rows: usize) -> Result<String> {
    let mut output = String::new();
    let kpis = &dashboard.kpis;
    let headers = vec!["indicator".to_string(), "value".to_string()];
    let rows = vec![
        vec!["Trafic Total".to_string(), format_thousands(kpis.total_traffic)],
        vec!["Stations".to_string(), kpis.station_count.to_string()],
        vec![
            "Top Station".to_string(),
            kpis.top_station.clone().unwrap_or_else(|| "-".to_string()),
        ],
        vec!["Moyenne / Station".to_string(), format_mean(kpis.mean_traffic)],
    ];
    output.push_str(&render_table(&headers, &rows, &[Align::Left, Align::Right]));

    let renderer = TextRenderer;
    for view in &dashboard.views {
        output.push('\n');
        output.push_str(&renderer.render(view)?);
    }

    output.push_str("\nDonnées détaillées\n");
    let limit = if detail_rows == 0 {
        dashboard.detail.len()
    } else {
        detail_rows
    };
    output.push_str(&station_table(
        dashboard.detail.iter().take(limit),
        &dashboard.columns,
    ));
    Ok(output)
}

fn station_table<'r>(
    records: impl Iterator<Item = &'r StationRecord>,
    fields: &[CanonicalField],
) -> String {
    let headers = fields.iter().map(|f| f.to_string()).collect::<Vec<_>>();
    let alignments = fields
        .iter()
        .map(|f| match f {
            CanonicalField::Traffic => Align::Right,
            _ => Align::Left,
        })
        .collect::<Vec<_>>();
    let rows = records
        .map(|record| {
            fields
                .iter()
                .map(|field| match field {
                    CanonicalField::Traffic => format_thousands(record.traffic),
                    other => record.value(*other).unwrap_or_default(),
                })
                .collect()
        })
        .collect::<Vec<Vec<String>>>();
    render_table(&headers, &rows, &alignments)
}

/// Renders chart views as plain text tables for terminal output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Figure = String;

    fn render(&self, view: &ChartView<'_>) -> Result<String> {
        let mut output = String::new();
        let _ = writeln!(output, "{}", view.spec.title);
        let body = match &view.data {
            ChartData::Paths(paths) => {
                let mut headers = view
                    .spec
                    .path
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>();
                headers.push(CanonicalField::Traffic.to_string());
                let mut alignments = vec![Align::Left; view.spec.path.len()];
                alignments.push(Align::Right);
                let rows = paths
                    .iter()
                    .map(|total| {
                        let mut row = total.path.clone();
                        row.push(format_thousands(total.traffic));
                        row
                    })
                    .collect::<Vec<_>>();
                render_table(&headers, &rows, &alignments)
            }
            ChartData::Stations(records) => station_table(
                records.iter(),
                &[
                    CanonicalField::Station,
                    CanonicalField::Network,
                    CanonicalField::Traffic,
                ],
            ),
            ChartData::Groups(groups) => {
                let total = saturating_total(groups.iter().map(|group| group.traffic));
                let headers = vec![
                    CanonicalField::Network.to_string(),
                    CanonicalField::Traffic.to_string(),
                    "share".to_string(),
                ];
                let rows = groups
                    .iter()
                    .map(|group| {
                        let share = if total > 0 {
                            group.traffic as f64 / total as f64 * 100.0
                        } else {
                            0.0
                        };
                        vec![
                            group.key.clone(),
                            format_thousands(group.traffic),
                            format!("{share:.2}%"),
                        ]
                    })
                    .collect::<Vec<_>>();
                render_table(&headers, &rows, &[Align::Left, Align::Right, Align::Right])
            }
            ChartData::Distribution(distribution) => {
                let headers = [
                    "Network", "count", "min", "q1", "median", "q3", "max", "outliers",
                ]
                .map(str::to_string)
                .to_vec();
                let rows = distribution
                    .box_stats()
                    .into_iter()
                    .map(|stats| {
                        vec![
                            stats.network,
                            stats.count.to_string(),
                            format_thousands(stats.min),
                            format_thousands(stats.q1.round() as i64),
                            format_thousands(stats.median.round() as i64),
                            format_thousands(stats.q3.round() as i64),
                            format_thousands(stats.max),
                            stats.outliers.to_string(),
                        ]
                    })
                    .collect::<Vec<_>>();
                let mut alignments = vec![Align::Right; headers.len()];
                alignments[0] = Align::Left;
                render_table(&headers, &rows, &alignments)
            }
        };
        output.push_str(&body);
        Ok(output)
    }
}
