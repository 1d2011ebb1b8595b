#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plans a safe route through a maze image.

mod image_source;
mod report;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::settings::Cli;

/// Entry point for the maze path command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.planner_config()?;
    tracing::info!(?config, "resolved planner configuration");

    let intensities = image_source::load_intensity_grid(&cli.image)?;
    let route = maze_path_system_planner::plan(&intensities, &config)
        .with_context(|| format!("failed to plan a route through {}", cli.image.display()))?;

    print!("{}", report::render(&route, cli.format)?);
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}
