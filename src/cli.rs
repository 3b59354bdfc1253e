use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::loader::DEFAULT_SOURCE_PATH;

#[derive(Debug, Parser)]
#[command(author, version, about = "Explore annual station ridership", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print indicators, every chart view, and the detail listing
    Report(ReportArgs),
    /// Emit one chart view (chart spec and data) as JSON
    Chart(ChartArgs),
    /// List the networks and cities available for filtering
    Options(OptionsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Semicolon-separated UTF-8 ridership file
    #[arg(short = 'i', long = "input", default_value = DEFAULT_SOURCE_PATH)]
    pub input: PathBuf,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Networks to keep (repeatable or comma-separated; defaults to all)
    #[arg(short = 'n', long = "network", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub networks: Vec<String>,
    /// Cities to keep (repeatable or comma-separated; defaults to no restriction)
    #[arg(short = 'c', long = "city", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub cities: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
    /// Maximum rows shown in the detail listing (0 = all)
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Which view to emit
    #[arg(value_enum)]
    pub view: ViewKind,
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Pretty-print the JSON document
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ViewKind {
    Sunburst,
    TopStations,
    Share,
    Distribution,
    Treemap,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Sunburst,
        ViewKind::TopStations,
        ViewKind::Share,
        ViewKind::Distribution,
        ViewKind::Treemap,
    ];
}

/// Splits comma-separated selection values, trimming blanks.
pub fn normalize_selection(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
