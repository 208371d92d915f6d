//! # Regional Breakdowns
//!
//! For a classification predicate, one bucket per canonical region holding
//! the number of UN member states in the region, how many satisfy the
//! predicate, and who they are. Buckets are always emitted for all nine
//! regions in canonical order; members are sorted by name.

use std::collections::BTreeMap;

use meridian_core::Region;
use serde::{Deserialize, Serialize};

/// One region's slice of a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBucket {
    pub region: Region,
    /// Member states satisfying the predicate.
    pub count: u32,
    /// Member states in the region.
    pub total: u32,
    pub members: Vec<String>,
}

/// Yes/no split of one region, as drawn by the regional bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YesNo {
    pub region: Region,
    pub yes: u32,
    pub no: u32,
    pub total: u32,
    /// Fraction in `[0, 1]`; 0 for an empty region.
    pub pct_yes: f64,
}

/// A predicate's breakdown across all canonical regions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionalBreakdown {
    regions: Vec<RegionBucket>,
}

impl RegionalBreakdown {
    pub fn buckets(&self) -> &[RegionBucket] {
        &self.regions
    }

    pub fn get(&self, region: Region) -> Option<&RegionBucket> {
        self.regions.iter().find(|b| b.region == region)
    }

    pub fn count(&self, region: Region) -> u32 {
        self.get(region).map_or(0, |b| b.count)
    }

    pub fn members(&self, region: Region) -> &[String] {
        self.get(region).map(|b| b.members.as_slice()).unwrap_or_default()
    }

    /// Sum of counts over all regions.
    pub fn total_count(&self) -> u32 {
        self.regions.iter().map(|b| b.count).sum()
    }

    pub fn yes_no(&self) -> Vec<YesNo> {
        self.regions
            .iter()
            .map(|b| YesNo {
                region: b.region,
                yes: b.count,
                no: b.total.saturating_sub(b.count),
                total: b.total,
                pct_yes: if b.total > 0 {
                    f64::from(b.count) / f64::from(b.total)
                } else {
                    0.0
                },
            })
            .collect()
    }
}

/// Incremental builder used by the aggregator's single pass.
#[derive(Debug, Default)]
pub(crate) struct RegionalAccumulator {
    buckets: BTreeMap<Region, (u32, Vec<String>)>,
}

impl RegionalAccumulator {
    pub(crate) fn record(&mut self, region: Region, country: &str, satisfied: bool) {
        let (total, members) = self.buckets.entry(region).or_default();
        *total += 1;
        if satisfied {
            members.push(country.to_string());
        }
    }

    pub(crate) fn finish(mut self) -> RegionalBreakdown {
        let regions = Region::all()
            .iter()
            .map(|&region| {
                let (total, mut members) = self.buckets.remove(&region).unwrap_or_default();
                members.sort();
                RegionBucket {
                    region,
                    count: members.len() as u32,
                    total,
                    members,
                }
            })
            .collect();
        RegionalBreakdown { regions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegionalBreakdown {
        let mut acc = RegionalAccumulator::default();
        acc.record(Region::Europe, "Germany", true);
        acc.record(Region::Europe, "Austria", true);
        acc.record(Region::Europe, "Malta", false);
        acc.record(Region::Asia, "Nepal", false);
        acc.finish()
    }

    #[test]
    fn every_region_emitted_in_canonical_order() {
        let breakdown = sample();
        let regions: Vec<Region> = breakdown.buckets().iter().map(|b| b.region).collect();
        assert_eq!(regions, Region::all());
    }

    #[test]
    fn members_sorted_and_counted() {
        let breakdown = sample();
        assert_eq!(breakdown.members(Region::Europe), ["Austria", "Germany"]);
        assert_eq!(breakdown.count(Region::Europe), 2);
        assert_eq!(breakdown.get(Region::Europe).unwrap().total, 3);
        assert_eq!(breakdown.count(Region::Oceania), 0);
        assert_eq!(breakdown.total_count(), 2);
    }

    #[test]
    fn yes_no_split() {
        let rows = sample().yes_no();
        let europe = rows.iter().find(|r| r.region == Region::Europe).unwrap();
        assert_eq!((europe.yes, europe.no, europe.total), (2, 1, 3));
        assert!((europe.pct_yes - 2.0 / 3.0).abs() < 1e-12);
        let asia = rows.iter().find(|r| r.region == Region::Asia).unwrap();
        assert_eq!((asia.yes, asia.no), (0, 1));
        let oceania = rows.iter().find(|r| r.region == Region::Oceania).unwrap();
        assert_eq!(oceania.pct_yes, 0.0);
    }
}
