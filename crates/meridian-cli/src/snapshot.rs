//! `meridian snapshot show|clear`: inspect or drop the cached snapshot.

use clap::{Args, Subcommand};
use serde_json::json;

use crate::context::{print_json, Context};
use crate::stats::render_stats;

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    #[command(subcommand)]
    pub action: SnapshotAction,
}

#[derive(Subcommand, Debug)]
pub enum SnapshotAction {
    /// Print the cached snapshot (defaults if nothing is cached).
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Remove the cached snapshot.
    Clear,
}

pub fn run_snapshot(args: &SnapshotArgs, ctx: &Context) -> anyhow::Result<u8> {
    let service = ctx.service();
    match &args.action {
        SnapshotAction::Show { json } => {
            let snapshot = service.cache().load();
            if *json {
                print_json(&snapshot)?;
            } else {
                let updated = snapshot
                    .meta
                    .updated_at
                    .map(|t| t.to_iso8601())
                    .unwrap_or_else(|| "never".to_string());
                println!("source: {}  updated: {updated}", snapshot.meta.source);
                print!("{}", render_stats(&snapshot.stats));
            }
        }
        SnapshotAction::Clear => {
            service.cache().clear()?;
            tracing::info!(dir = %ctx.config.cache_dir.display(), "snapshot cleared");
            print_json(&json!({ "cleared": service.cache().key() }))?;
        }
    }
    Ok(0)
}
