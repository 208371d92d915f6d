//! # Placeholder Values
//!
//! The narrative text carries numeric slots identified by element id. This
//! module maps a snapshot onto those ids; substituting them into markup is
//! the caller's business.

use serde::Serialize;

use crate::aggregate::AggregateStats;

/// A named value for one text slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub id: &'static str,
    pub value: u32,
}

/// Every slot id, in page order.
pub const PLACEHOLDER_IDS: [&str; 17] = [
    "stat-intro-jurisdiction",
    "stat-criminalization-at-least-one",
    "stat-criminalization-percent",
    "stat-criminalization-all-four",
    "stat-command-responsibility",
    "stat-jurisdiction-any",
    "stat-jurisdiction-absolute",
    "stat-jurisdiction-presence",
    "stat-jurisdiction-active",
    "stat-jurisdiction-passive",
    "stat-jurisdiction-protective",
    "stat-jurisdiction-treaty",
    "stat-cases-launched",
    "stat-jurisdiction-for-gap",
    "stat-jurisdiction-any-2",
    "stat-percent-used-laws",
    "stat-specialized-units",
];

pub fn placeholders(stats: &AggregateStats) -> Vec<Placeholder> {
    let j = &stats.jurisdiction;
    let values = [
        j.any_jurisdiction,
        stats.criminalization.at_least_one,
        stats.percentages.at_least_one_crime,
        stats.criminalization.all_four,
        stats.command_responsibility,
        j.any_jurisdiction,
        j.absolute_uj,
        j.presence_required,
        j.active_personality,
        j.passive_personality,
        j.protective_principle,
        j.treaty_based,
        stats.practice.has_launched_case,
        j.any_jurisdiction,
        j.any_jurisdiction,
        stats.percentages.has_used_laws,
        stats.practice.has_specialized_unit,
    ];
    PLACEHOLDER_IDS
        .iter()
        .zip(values)
        .map(|(id, value)| Placeholder { id: *id, value })
        .collect()
}

/// Value of a single slot.
pub fn lookup(stats: &AggregateStats, id: &str) -> Option<u32> {
    placeholders(stats)
        .into_iter()
        .find(|p| p.id == id)
        .map(|p| p.value)
}
