//! `meridian sync`: run both load phases once, as a page visit would.
//!
//! Phase 2 runs on the service's background refresh, so a failing provider
//! is logged and the phase-1 values stay in place.

use std::time::Duration;

use anyhow::Context as _;
use clap::Args;
use meridian_service::StatsOrigin;
use meridian_snapshot::changed_fields;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Delay before the live refresh, in milliseconds. Defaults to the
    /// configured `refresh_delay_ms`.
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

pub async fn run_sync(args: &SyncArgs, ctx: &Context) -> anyhow::Result<u8> {
    let service = ctx.service();
    let cached = service.load_cached();
    println!(
        "phase 1: {} ({} member states)",
        cached.origin, cached.stats.total_countries
    );

    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| ctx.config.refresh_delay());
    service
        .schedule_refresh(delay)
        .await
        .context("background refresh task")?;

    let current = service.current();
    match &current.origin {
        StatsOrigin::Live { provider } => {
            println!("phase 2: updated from {provider}");
            for change in changed_fields(&cached.stats, &current.stats) {
                println!("  {}: {} -> {}", change.field, change.old, change.new);
            }
        }
        origin => println!(
            "phase 2: kept {origin} values ({} member states)",
            current.stats.total_countries
        ),
    }
    Ok(0)
}
