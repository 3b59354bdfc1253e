pub mod aggregate;
pub mod cache;
pub mod chart;
pub mod cli;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod io_utils;
pub mod loader;
pub mod normalize;
pub mod report;
pub mod schema;
pub mod stats;
pub mod summary;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("station_traffic", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Parsed command: {:?}", cli.command);
    match cli.command {
        Commands::Report(args) => report::execute_report(&args),
        Commands::Chart(args) => report::execute_chart(&args),
        Commands::Options(args) => report::execute_options(&args),
    }
}
