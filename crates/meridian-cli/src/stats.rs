//! `meridian stats`, `meridian regions` and `meridian placeholders`.

use std::fmt::Write as _;
use std::str::FromStr;

use anyhow::Context as _;
use clap::Args;
use meridian_core::Classification;
use meridian_stats::{aggregate, placeholders, AggregateStats, RegionalBreakdown};

use crate::context::{classified_records, print_json, Context};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Print the cached snapshot instead of computing from records.
    #[arg(long)]
    pub cached: bool,

    /// Emit JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RegionsArgs {
    /// Classification to break down, e.g. `absoluteUj`, `commandResponsibility`.
    pub classification: String,

    /// Show yes/no counts and percentages instead of member lists.
    #[arg(long)]
    pub yes_no: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PlaceholdersArgs {
    /// Use the cached snapshot instead of computing from records.
    #[arg(long)]
    pub cached: bool,

    #[arg(long)]
    pub json: bool,
}

async fn current_stats(ctx: &Context, cached: bool) -> anyhow::Result<AggregateStats> {
    let service = ctx.service();
    if cached {
        let published = service.load_cached();
        tracing::info!(origin = %published.origin, "using cached statistics");
        return Ok(published.stats.clone());
    }
    let records = classified_records(&service).await?;
    Ok(aggregate(&records))
}

pub async fn run_stats(args: &StatsArgs, ctx: &Context) -> anyhow::Result<u8> {
    let stats = current_stats(ctx, args.cached).await?;
    if args.json {
        print_json(&stats)?;
    } else {
        print!("{}", render_stats(&stats));
    }
    Ok(0)
}

pub async fn run_regions(args: &RegionsArgs, ctx: &Context) -> anyhow::Result<u8> {
    let classification = Classification::from_str(&args.classification).with_context(|| {
        let known: Vec<&str> = Classification::all().iter().map(|c| c.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })?;
    let stats = current_stats(ctx, false).await?;
    let breakdown = stats
        .breakdown(classification)
        .cloned()
        .unwrap_or_default();

    match (args.yes_no, args.json) {
        (true, true) => print_json(&breakdown.yes_no())?,
        (false, true) => print_json(&breakdown)?,
        (yes_no, false) => print!("{}", render_breakdown(&breakdown, yes_no)),
    }
    Ok(0)
}

pub async fn run_placeholders(args: &PlaceholdersArgs, ctx: &Context) -> anyhow::Result<u8> {
    let stats = current_stats(ctx, args.cached).await?;
    let slots = placeholders(&stats);
    if args.json {
        print_json(&slots)?;
    } else {
        for slot in slots {
            println!("{} = {}", slot.id, slot.value);
        }
    }
    Ok(0)
}

pub(crate) fn render_stats(stats: &AggregateStats) -> String {
    let c = &stats.criminalization;
    let j = &stats.jurisdiction;
    let rows: [(&str, u32); 17] = [
        ("UN member states", stats.total_countries),
        ("At least one crime", c.at_least_one),
        ("All four crimes", c.all_four),
        ("Genocide", c.genocide),
        ("War crimes", c.war_crimes),
        ("Crimes against humanity", c.crimes_against_humanity),
        ("Aggression", c.aggression),
        ("Command responsibility", stats.command_responsibility),
        ("Any jurisdiction", j.any_jurisdiction),
        ("Absolute UJ", j.absolute_uj),
        ("Presence required", j.presence_required),
        ("Active personality", j.active_personality),
        ("Passive personality", j.passive_personality),
        ("Protective principle", j.protective_principle),
        ("Treaty based", j.treaty_based),
        ("Launched a case", stats.practice.has_launched_case),
        ("Specialized unit", stats.practice.has_specialized_unit),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<26}{value:>5}");
    }
    let _ = writeln!(out, "{:<26}{:>4}%", "Criminalize at least one", stats.percentages.at_least_one_crime);
    let _ = writeln!(out, "{:<26}{:>4}%", "Have used their laws", stats.percentages.has_used_laws);
    for issue in &stats.consistency {
        let _ = writeln!(
            out,
            "warning: {} flags at least one crime = {} but criminalizes {} of four",
            issue.country,
            issue.flagged_at_least_one,
            issue.criminalized.len()
        );
    }
    out
}

pub(crate) fn render_breakdown(breakdown: &RegionalBreakdown, yes_no: bool) -> String {
    let mut out = String::new();
    if yes_no {
        for row in breakdown.yes_no() {
            let _ = writeln!(
                out,
                "{:<30} yes {:>3}  no {:>3}  ({:.0}%)",
                row.region.display_name(),
                row.yes,
                row.no,
                row.pct_yes * 100.0
            );
        }
        return out;
    }
    for bucket in breakdown.buckets() {
        let _ = writeln!(
            out,
            "{:<30} {:>3}/{:<3} {}",
            bucket.region.display_name(),
            bucket.count,
            bucket.total,
            bucket.members.join(", ")
        );
    }
    out
}
