//! # meridian-stats — Jurisdiction Statistics Engine
//!
//! Turns a hand-maintained country dataset into counts, percentages,
//! regional breakdowns and chart-shaped groupings.
//!
//! ## Pipeline
//!
//! ```text
//! RecordSet ──▶ ColumnMap::resolve ──▶ CountryRecord::classify ──▶ aggregate()
//!  (headers,      (once per set)          (per row, typed)           AggregateStats
//!   raw rows)
//! ```
//!
//! Everything here is synchronous and pure. Acquisition, caching and
//! publication live in `meridian-source`, `meridian-snapshot` and
//! `meridian-service`.
//!
//! ## Counting rules
//!
//! - Only `"UN Member State"` records count toward any statistic.
//! - "At least one crime" is the dataset's own flag, never derived from the
//!   four crime flags. Disagreements are listed in
//!   [`AggregateStats::consistency`].
//! - "Any jurisdiction" is an existence test over the jurisdiction columns.
//!   A state can have one while matching none of the six named bases.

pub mod aggregate;
pub mod classify;
pub mod columns;
pub mod error;
pub mod frequency;
pub mod placeholders;
pub mod record;
pub mod regional;
pub mod views;

pub use aggregate::{
    aggregate, percent, AggregateStats, ConsistencyIssue, CriminalizationCounts,
    JurisdictionCounts, Percentages, PracticeCounts,
};
pub use classify::{classify_all, has_jurisdiction_value, is_yes, parse_case_count, CountryRecord};
pub use columns::{ColumnMap, FieldSpec, SemanticField};
pub use error::StatsError;
pub use placeholders::{placeholders, Placeholder};
pub use record::{record_from_json, FieldValue, RawRecord, RecordSet};
pub use regional::{RegionBucket, RegionalBreakdown, YesNo};

/// Classify and aggregate a record set in one call.
pub fn compute(set: &RecordSet) -> AggregateStats {
    aggregate(&classify_all(set))
}
