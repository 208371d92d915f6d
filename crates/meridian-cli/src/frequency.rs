//! `meridian frequency`: normalize yearly phrase counts per million words.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use meridian_source::parse_csv;
use meridian_stats::frequency::{counts_from_records, normalize, parse_totals};

use crate::context::print_json;

#[derive(Args, Debug)]
pub struct FrequencyArgs {
    /// CSV with `year` and `count` columns.
    #[arg(long)]
    pub counts: PathBuf,

    /// Corpus totals file (tab-separated `year,words,pages,volumes`).
    #[arg(long)]
    pub totals: PathBuf,
}

pub fn run_frequency(args: &FrequencyArgs) -> anyhow::Result<u8> {
    let counts_csv = std::fs::read(&args.counts)
        .with_context(|| format!("reading {}", args.counts.display()))?;
    let counts = counts_from_records(&parse_csv(&counts_csv)?)?;
    let totals_text = std::fs::read_to_string(&args.totals)
        .with_context(|| format!("reading {}", args.totals.display()))?;
    let totals = parse_totals(&totals_text)?;

    let series = normalize(&counts, &totals);
    if series.len() < counts.len() {
        tracing::warn!(
            dropped = counts.len() - series.len(),
            "years without corpus totals skipped"
        );
    }
    print_json(&series)?;
    Ok(0)
}
