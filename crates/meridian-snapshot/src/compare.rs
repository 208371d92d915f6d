//! # Snapshot Comparison
//!
//! Deciding whether a fresh calculation is worth persisting looks at a fixed
//! set of headline counts. Everything else (per-crime counts, percentages,
//! regional breakdowns) follows from the dataset and is replaced wholesale
//! whenever one of the compared counts moves.

use meridian_stats::AggregateStats;
use serde::Serialize;

/// The headline counts inspected by [`has_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparedField {
    CriminalizationAtLeastOne,
    CriminalizationAllFour,
    CommandResponsibility,
    JurisdictionAny,
    JurisdictionAbsoluteUj,
    JurisdictionPresenceRequired,
    PracticeLaunchedCase,
    PracticeSpecializedUnit,
}

impl ComparedField {
    pub fn all() -> &'static [ComparedField] {
        &[
            Self::CriminalizationAtLeastOne,
            Self::CriminalizationAllFour,
            Self::CommandResponsibility,
            Self::JurisdictionAny,
            Self::JurisdictionAbsoluteUj,
            Self::JurisdictionPresenceRequired,
            Self::PracticeLaunchedCase,
            Self::PracticeSpecializedUnit,
        ]
    }

    /// Dotted path into the persisted JSON shape.
    pub fn path(&self) -> &'static str {
        match self {
            Self::CriminalizationAtLeastOne => "criminalization.atLeastOne",
            Self::CriminalizationAllFour => "criminalization.allFour",
            Self::CommandResponsibility => "commandResponsibility",
            Self::JurisdictionAny => "jurisdiction.anyJurisdiction",
            Self::JurisdictionAbsoluteUj => "jurisdiction.absoluteUJ",
            Self::JurisdictionPresenceRequired => "jurisdiction.presenceRequired",
            Self::PracticeLaunchedCase => "practice.hasLaunchedCase",
            Self::PracticeSpecializedUnit => "practice.hasSpecializedUnit",
        }
    }

    pub fn value(&self, stats: &AggregateStats) -> u32 {
        match self {
            Self::CriminalizationAtLeastOne => stats.criminalization.at_least_one,
            Self::CriminalizationAllFour => stats.criminalization.all_four,
            Self::CommandResponsibility => stats.command_responsibility,
            Self::JurisdictionAny => stats.jurisdiction.any_jurisdiction,
            Self::JurisdictionAbsoluteUj => stats.jurisdiction.absolute_uj,
            Self::JurisdictionPresenceRequired => stats.jurisdiction.presence_required,
            Self::PracticeLaunchedCase => stats.practice.has_launched_case,
            Self::PracticeSpecializedUnit => stats.practice.has_specialized_unit,
        }
    }
}

impl std::fmt::Display for ComparedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// One compared count that differs between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: ComparedField,
    pub old: u32,
    pub new: u32,
}

/// `true` when any compared count differs.
pub fn has_changed(old: &AggregateStats, new: &AggregateStats) -> bool {
    ComparedField::all()
        .iter()
        .any(|f| f.value(old) != f.value(new))
}

/// Every compared count that differs, in comparison order.
pub fn changed_fields(old: &AggregateStats, new: &AggregateStats) -> Vec<FieldChange> {
    ComparedField::all()
        .iter()
        .filter_map(|&field| {
            let (old, new) = (field.value(old), field.value(new));
            (old != new).then_some(FieldChange { field, old, new })
        })
        .collect()
}
