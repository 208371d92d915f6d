//! # Term Frequency
//!
//! The "universal jurisdiction in print" chart plots yearly phrase counts
//! normalized by the size of the corpus for that year, in occurrences per
//! million words.
//!
//! Corpus totals come as one tab-separated line of
//! `year,match_count,page_count,volume_count` entries; only `match_count`
//! (total words) is used.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StatsError;
use crate::record::RecordSet;

/// Raw phrase count for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: f64,
}

/// Normalized phrase frequency for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearFrequency {
    pub year: i32,
    pub count: f64,
    pub per_million: f64,
}

/// Parse the corpus totals file into `year -> total words`.
pub fn parse_totals(text: &str) -> Result<BTreeMap<i32, u64>, StatsError> {
    let entry = Regex::new(r"^(\d+),(\d+),(\d+),(\d+)$")?;
    let mut totals = BTreeMap::new();
    for raw in text.split(['\t', '\n']) {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let caps = entry
            .captures(raw)
            .ok_or_else(|| StatsError::MalformedTotals(raw.to_string()))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| StatsError::MalformedTotals(raw.to_string()))?;
        let words: u64 = caps[2]
            .parse()
            .map_err(|_| StatsError::MalformedTotals(raw.to_string()))?;
        totals.insert(year, words);
    }
    Ok(totals)
}

/// Read `year` / `count` columns from a tabular record set.
pub fn counts_from_records(set: &RecordSet) -> Result<Vec<YearCount>, StatsError> {
    set.rows()
        .iter()
        .map(|row| -> Result<YearCount, StatsError> {
            let cell = |name: &str| {
                row.get(name)
                    .map(|v| v.joined().trim().to_string())
                    .ok_or_else(|| StatsError::MissingColumn(name.to_string()))
            };
            let year = cell("year")?;
            let count = cell("count")?;
            let year: i32 = year
                .parse()
                .map_err(|_| StatsError::InvalidNumber(year.clone()))?;
            let count: f64 = count
                .parse()
                .map_err(|_| StatsError::InvalidNumber(count.clone()))?;
            Ok(YearCount { year, count })
        })
        .collect()
}

/// Normalize counts to occurrences per million words.
///
/// Years without a corpus total, or with a zero total, are skipped.
pub fn normalize(counts: &[YearCount], totals: &BTreeMap<i32, u64>) -> Vec<YearFrequency> {
    counts
        .iter()
        .filter_map(|c| {
            let total = *totals.get(&c.year)?;
            if total == 0 {
                return None;
            }
            Some(YearFrequency {
                year: c.year,
                count: c.count,
                per_million: c.count / total as f64 * 1_000_000.0,
            })
        })
        .collect()
}
