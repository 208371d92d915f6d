//! Jurisdiction-basis flows: which states reach beyond their borders, on
//! which bases, for which crimes. Regions here are listed alphabetically,
//! unlike the canonical order used elsewhere.

use std::collections::BTreeMap;

use meridian_core::{Crime, JurisdictionBasis, Region};
use serde::Serialize;

use crate::classify::CountryRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyState {
    pub country: String,
    pub region: Option<Region>,
    /// Whether any of the six bases matched.
    pub has_beyond_borders: bool,
    pub bases: Vec<JurisdictionBasis>,
    pub type_count: usize,
    /// Slugs of crimes with any jurisdiction value.
    pub crimes: Vec<&'static str>,
}

impl SankeyState {
    pub fn has(&self, basis: JurisdictionBasis) -> bool {
        self.bases.contains(&basis)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyRegion {
    pub with_jurisdiction: Vec<String>,
    pub without_jurisdiction: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyView {
    pub states: Vec<SankeyState>,
    /// Region order for the chart: alphabetical by canonical name.
    pub region_order: Vec<Region>,
    pub regions: BTreeMap<Region, SankeyRegion>,
    pub total: usize,
    pub beyond_borders: usize,
    pub by_basis: BTreeMap<JurisdictionBasis, usize>,
}

/// Canonical regions sorted by name.
pub fn alphabetical_regions() -> Vec<Region> {
    let mut regions = Region::all().to_vec();
    regions.sort_by_key(|r| r.as_str());
    regions
}

pub fn sankey(records: &[CountryRecord]) -> SankeyView {
    let states: Vec<SankeyState> = super::un_members(records)
        .map(|record| {
            let bases = record.bases();
            SankeyState {
                country: record.country.clone(),
                region: record.region,
                has_beyond_borders: !bases.is_empty(),
                type_count: bases.len(),
                bases,
                crimes: Crime::all()
                    .iter()
                    .filter(|c| record.has_jurisdiction_for(**c))
                    .map(Crime::slug)
                    .collect(),
            }
        })
        .collect();

    let mut regions: BTreeMap<Region, SankeyRegion> = Region::all()
        .iter()
        .map(|r| (*r, SankeyRegion::default()))
        .collect();
    for state in &states {
        let Some(bucket) = state.region.and_then(|r| regions.get_mut(&r)) else {
            continue;
        };
        if state.has_beyond_borders {
            bucket.with_jurisdiction.push(state.country.clone());
        } else {
            bucket.without_jurisdiction.push(state.country.clone());
        }
    }
    for bucket in regions.values_mut() {
        bucket.with_jurisdiction.sort();
        bucket.without_jurisdiction.sort();
    }

    let by_basis = JurisdictionBasis::all()
        .iter()
        .map(|b| (*b, states.iter().filter(|s| s.has(*b)).count()))
        .collect();

    SankeyView {
        total: states.len(),
        beyond_borders: states.iter().filter(|s| s.has_beyond_borders).count(),
        region_order: alphabetical_regions(),
        regions,
        by_basis,
        states,
    }
}
