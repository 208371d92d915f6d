//! # Aggregation
//!
//! [`aggregate`] reduces classified records into an [`AggregateStats`]
//! snapshot in one pass over the UN member states. Non-members are skipped
//! entirely; members with an unresolvable region count toward global totals
//! but not toward any regional breakdown.
//!
//! The JSON shape (camelCase, `absoluteUJ`) is the persisted cache format
//! and must stay stable.

use std::collections::BTreeMap;

use meridian_core::{Classification, Crime, JurisdictionBasis};
use serde::{Deserialize, Serialize};

use crate::classify::CountryRecord;
use crate::regional::{RegionalAccumulator, RegionalBreakdown};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriminalizationCounts {
    pub at_least_one: u32,
    pub all_four: u32,
    pub war_crimes: u32,
    pub genocide: u32,
    pub crimes_against_humanity: u32,
    pub aggression: u32,
}

impl CriminalizationCounts {
    pub fn for_crime(&self, crime: Crime) -> u32 {
        match crime {
            Crime::Genocide => self.genocide,
            Crime::WarCrimes => self.war_crimes,
            Crime::CrimesAgainstHumanity => self.crimes_against_humanity,
            Crime::Aggression => self.aggression,
        }
    }

    fn bump(&mut self, crime: Crime) {
        match crime {
            Crime::Genocide => self.genocide += 1,
            Crime::WarCrimes => self.war_crimes += 1,
            Crime::CrimesAgainstHumanity => self.crimes_against_humanity += 1,
            Crime::Aggression => self.aggression += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionCounts {
    pub any_jurisdiction: u32,
    #[serde(rename = "absoluteUJ")]
    pub absolute_uj: u32,
    pub presence_required: u32,
    pub active_personality: u32,
    pub passive_personality: u32,
    pub protective_principle: u32,
    pub treaty_based: u32,
}

impl JurisdictionCounts {
    pub fn for_basis(&self, basis: JurisdictionBasis) -> u32 {
        match basis {
            JurisdictionBasis::AbsoluteUj => self.absolute_uj,
            JurisdictionBasis::PresenceBased => self.presence_required,
            JurisdictionBasis::ActivePersonality => self.active_personality,
            JurisdictionBasis::PassivePersonality => self.passive_personality,
            JurisdictionBasis::ProtectivePrinciple => self.protective_principle,
            JurisdictionBasis::TreatyBased => self.treaty_based,
        }
    }

    fn bump(&mut self, basis: JurisdictionBasis) {
        match basis {
            JurisdictionBasis::AbsoluteUj => self.absolute_uj += 1,
            JurisdictionBasis::PresenceBased => self.presence_required += 1,
            JurisdictionBasis::ActivePersonality => self.active_personality += 1,
            JurisdictionBasis::PassivePersonality => self.passive_personality += 1,
            JurisdictionBasis::ProtectivePrinciple => self.protective_principle += 1,
            JurisdictionBasis::TreatyBased => self.treaty_based += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeCounts {
    pub has_launched_case: u32,
    pub has_specialized_unit: u32,
}

/// Integer percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Percentages {
    /// Share of member states with the "at least one crime" flag.
    pub at_least_one_crime: u32,
    /// Share of jurisdiction-capable states that have launched a case.
    pub has_used_laws: u32,
}

/// A member state whose "at least one crime" flag disagrees with its four
/// crime flags. Reported, never corrected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyIssue {
    pub country: String,
    pub flagged_at_least_one: bool,
    pub criminalized: Vec<Crime>,
}

/// Immutable statistics snapshot over UN member states.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_countries: u32,
    pub criminalization: CriminalizationCounts,
    pub command_responsibility: u32,
    pub jurisdiction: JurisdictionCounts,
    pub practice: PracticeCounts,
    pub percentages: Percentages,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub regional: BTreeMap<Classification, RegionalBreakdown>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consistency: Vec<ConsistencyIssue>,
}

impl AggregateStats {
    /// Breakdown for one classification. `None` for snapshots that carry no
    /// breakdowns (defaults, caches written by older clients).
    pub fn breakdown(&self, classification: Classification) -> Option<&RegionalBreakdown> {
        self.regional.get(&classification)
    }
}

/// `round(count / total * 100)`, 0 for an empty denominator, clamped to 100.
pub fn percent(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let pct = (f64::from(count) / f64::from(total) * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Reduce classified records into a snapshot.
pub fn aggregate(records: &[CountryRecord]) -> AggregateStats {
    let mut stats = AggregateStats::default();
    let mut regional: BTreeMap<Classification, RegionalAccumulator> = Classification::all()
        .iter()
        .map(|c| (*c, RegionalAccumulator::default()))
        .collect();

    for record in records.iter().filter(|r| r.is_un_member()) {
        stats.total_countries += 1;

        for crime in record.criminalized() {
            stats.criminalization.bump(crime);
        }
        if record.has_at_least_one_crime {
            stats.criminalization.at_least_one += 1;
        }
        if record.criminalizes_all() {
            stats.criminalization.all_four += 1;
        }
        if record.command_responsibility {
            stats.command_responsibility += 1;
        }
        if record.has_any_jurisdiction() {
            stats.jurisdiction.any_jurisdiction += 1;
        }
        for basis in record.bases() {
            stats.jurisdiction.bump(basis);
        }
        if record.has_launched_case {
            stats.practice.has_launched_case += 1;
        }
        if record.has_specialized_unit {
            stats.practice.has_specialized_unit += 1;
        }

        if !record.is_consistent() {
            stats.consistency.push(ConsistencyIssue {
                country: record.country.clone(),
                flagged_at_least_one: record.has_at_least_one_crime,
                criminalized: record.criminalized().collect(),
            });
        }

        if let Some(region) = record.region {
            for (classification, acc) in regional.iter_mut() {
                acc.record(region, &record.country, record.satisfies(*classification));
            }
        }
    }

    stats.percentages = Percentages {
        at_least_one_crime: percent(stats.criminalization.at_least_one, stats.total_countries),
        has_used_laws: percent(
            stats.practice.has_launched_case,
            stats.jurisdiction.any_jurisdiction,
        ),
    };
    stats.consistency.sort_by(|a, b| a.country.cmp(&b.country));
    stats.regional = regional
        .into_iter()
        .map(|(c, acc)| (c, acc.finish()))
        .collect();

    tracing::debug!(
        total = stats.total_countries,
        any_jurisdiction = stats.jurisdiction.any_jurisdiction,
        inconsistent = stats.consistency.len(),
        "aggregated statistics"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Region;

    fn member(country: &str, region: Option<Region>) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            iso_code: None,
            status: meridian_core::UN_MEMBER_STATUS.to_string(),
            region,
            criminalizes: [false; 4],
            has_at_least_one_crime: false,
            command_responsibility: false,
            extraterritorial_provision: false,
            jurisdiction: Default::default(),
            has_launched_case: false,
            case_count: 0,
            has_specialized_unit: false,
            ratified_rome_statute: false,
            domesticated_rome_statute: false,
        }
    }

    #[test]
    fn percent_rounds_and_guards_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(1, 200), 1);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(7, 3), 100);
    }

    #[test]
    fn empty_input() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_countries, 0);
        assert_eq!(stats.percentages, Percentages::default());
    }

    #[test]
    fn non_members_are_ignored() {
        let mut observer = member("Holy See", Some(Region::Europe));
        observer.status = "Observer State".into();
        observer.command_responsibility = true;
        let stats = aggregate(&[observer]);
        assert_eq!(stats.total_countries, 0);
        assert_eq!(stats.command_responsibility, 0);
        assert_eq!(stats.regional[&Classification::CommandResponsibility].total_count(), 0);
    }

    #[test]
    fn unknown_region_counts_globally_only() {
        let mut a = member("Atlantis", None);
        a.command_responsibility = true;
        let mut b = member("Chile", Some(Region::SouthAmerica));
        b.command_responsibility = true;
        let stats = aggregate(&[a, b]);
        assert_eq!(stats.command_responsibility, 2);
        let breakdown = &stats.regional[&Classification::CommandResponsibility];
        assert_eq!(breakdown.total_count(), 1);
        assert_eq!(breakdown.members(Region::SouthAmerica), ["Chile"]);
    }

    #[test]
    fn used_laws_percentage_uses_jurisdiction_denominator() {
        let mut a = member("A", Some(Region::Asia));
        a.jurisdiction[0] = "UJ".into();
        a.has_launched_case = true;
        let mut b = member("B", Some(Region::Asia));
        b.jurisdiction[1] = "Territorial".into();
        let c = member("C", Some(Region::Asia));
        let stats = aggregate(&[a, b, c]);
        assert_eq!(stats.jurisdiction.any_jurisdiction, 2);
        assert_eq!(stats.jurisdiction.absolute_uj, 1);
        assert_eq!(stats.percentages.has_used_laws, 50);
    }

    #[test]
    fn inconsistencies_are_reported_not_fixed() {
        let mut a = member("Zeta", None);
        a.has_at_least_one_crime = true;
        let mut b = member("Alpha", None);
        b.criminalizes[Crime::Aggression.index()] = true;
        let stats = aggregate(&[a, b]);
        assert_eq!(stats.criminalization.at_least_one, 1);
        assert_eq!(stats.criminalization.aggression, 1);
        let names: Vec<&str> = stats.consistency.iter().map(|i| i.country.as_str()).collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
        assert_eq!(stats.consistency[0].criminalized, vec![Crime::Aggression]);
    }

    #[test]
    fn json_uses_cache_field_names() {
        let json = serde_json::to_value(aggregate(&[])).unwrap();
        assert!(json.get("totalCountries").is_some());
        assert!(json["criminalization"].get("atLeastOne").is_some());
        assert!(json["jurisdiction"].get("absoluteUJ").is_some());
        assert!(json["percentages"].get("hasUsedLaws").is_some());
        assert!(json["practice"].get("hasSpecializedUnit").is_some());
    }

    #[test]
    fn deserializes_snapshots_without_breakdowns() {
        let json = serde_json::json!({
            "totalCountries": 3,
            "criminalization": {"atLeastOne": 2, "allFour": 1, "warCrimes": 2,
                                "genocide": 2, "crimesAgainstHumanity": 1, "aggression": 1},
            "commandResponsibility": 1,
            "jurisdiction": {"anyJurisdiction": 2, "absoluteUJ": 1, "presenceRequired": 0,
                             "activePersonality": 1, "passivePersonality": 0,
                             "protectivePrinciple": 0, "treatyBased": 1},
            "practice": {"hasLaunchedCase": 1, "hasSpecializedUnit": 0},
            "percentages": {"atLeastOneCrime": 67, "hasUsedLaws": 50}
        });
        let stats: AggregateStats = serde_json::from_value(json).unwrap();
        assert_eq!(stats.jurisdiction.absolute_uj, 1);
        assert!(stats.regional.is_empty());
        assert!(stats.breakdown(Classification::Genocide).is_none());
    }
}
