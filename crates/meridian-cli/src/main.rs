//! # meridian CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meridian_cli::context::{Context, Overrides};
use meridian_cli::frequency::{run_frequency, FrequencyArgs};
use meridian_cli::snapshot::{run_snapshot, SnapshotArgs};
use meridian_cli::stats::{
    run_placeholders, run_regions, run_stats, PlaceholdersArgs, RegionsArgs, StatsArgs,
};
use meridian_cli::sync::{run_sync, SyncArgs};
use meridian_cli::views::{run_views, ViewsArgs};

/// Project Meridian statistics engine.
///
/// Computes universal-jurisdiction statistics over the country dataset,
/// produces chart data and page placeholder values, and manages the cached
/// snapshot shown on first paint.
#[derive(Parser, Debug)]
#[command(name = "meridian", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./meridian.yaml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Snapshot cache directory.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Bundled preload file (JSON array or `DATA_PRELOAD` script).
    #[arg(long, global = true)]
    preload: Option<PathBuf>,

    /// CSV snapshot of the dataset.
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Headline counts and percentages.
    Stats(StatsArgs),

    /// Per-region breakdown of one classification.
    Regions(RegionsArgs),

    /// Chart data as JSON.
    Views(ViewsArgs),

    /// Values for the page's numeric text slots.
    Placeholders(PlaceholdersArgs),

    /// Show or clear the cached snapshot.
    Snapshot(SnapshotArgs),

    /// Publish the cached snapshot, then refresh from live data.
    Sync(SyncArgs),

    /// Normalize yearly phrase counts by corpus size.
    Frequency(FrequencyArgs),
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let Cli {
        command,
        config,
        cache_dir,
        preload,
        csv,
        ..
    } = cli;
    let context = move || {
        Context::load(
            config.as_deref(),
            Overrides {
                cache_dir,
                preload,
                csv,
            },
        )
    };
    match &command {
        Commands::Stats(args) => run_stats(args, &context()?).await,
        Commands::Regions(args) => run_regions(args, &context()?).await,
        Commands::Views(args) => run_views(args, &context()?).await,
        Commands::Placeholders(args) => run_placeholders(args, &context()?).await,
        Commands::Snapshot(args) => run_snapshot(args, &context()?),
        Commands::Sync(args) => run_sync(args, &context()?).await,
        Commands::Frequency(args) => run_frequency(args),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    tracing::debug!("meridian CLI starting");

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
