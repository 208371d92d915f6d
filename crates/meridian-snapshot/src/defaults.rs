//! First-visit snapshot, shown before any live calculation has been cached.

use meridian_stats::{
    AggregateStats, CriminalizationCounts, JurisdictionCounts, Percentages, PracticeCounts,
};

/// Hardcoded statistics for a store with no usable cache entry.
///
/// Carries no regional breakdowns or consistency findings.
pub fn default_stats() -> AggregateStats {
    AggregateStats {
        total_countries: 193,
        criminalization: CriminalizationCounts {
            at_least_one: 153,
            all_four: 32,
            war_crimes: 148,
            genocide: 131,
            crimes_against_humanity: 94,
            aggression: 86,
        },
        command_responsibility: 82,
        jurisdiction: JurisdictionCounts {
            any_jurisdiction: 148,
            absolute_uj: 97,
            presence_required: 128,
            active_personality: 98,
            passive_personality: 73,
            protective_principle: 52,
            treaty_based: 121,
        },
        practice: PracticeCounts {
            has_launched_case: 26,
            has_specialized_unit: 26,
        },
        percentages: Percentages {
            at_least_one_crime: 79,
            has_used_laws: 18,
        },
        ..AggregateStats::default()
    }
}
