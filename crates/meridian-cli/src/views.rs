//! `meridian views <kind>`: chart-shaped data as JSON.

use clap::{Args, ValueEnum};
use meridian_stats::views;

use crate::context::{classified_records, print_json, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
    /// Crimes criminalized per country, for the world map.
    Choropleth,
    /// Jurisdiction bases flowing into regions.
    Sankey,
    /// UJ/ETJ cases per country, grouped by region.
    Jurisprudence,
    /// Specialized investigative units per region.
    SpecializedUnits,
}

#[derive(Args, Debug)]
pub struct ViewsArgs {
    #[arg(value_enum)]
    pub view: ViewKind,
}

pub async fn run_views(args: &ViewsArgs, ctx: &Context) -> anyhow::Result<u8> {
    let records = classified_records(&ctx.service()).await?;
    match args.view {
        ViewKind::Choropleth => print_json(&views::choropleth(&records))?,
        ViewKind::Sankey => print_json(&views::sankey(&records))?,
        ViewKind::Jurisprudence => print_json(&views::jurisprudence(&records))?,
        ViewKind::SpecializedUnits => print_json(&views::specialized_units(&records))?,
    }
    Ok(0)
}
