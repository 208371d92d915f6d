//! # Canonical Regions
//!
//! The nine geographic groupings used for every regional breakdown. The
//! source dataset is hand-maintained, so region labels drift ("Middle East
//! and North Africa", "Middle East / North Africa", trailing spaces);
//! [`Region::normalize`] collapses those onto the canonical set.
//!
//! Variant order is the canonical display order. `Ord` is derived, so a
//! `BTreeMap<Region, _>` iterates regions in that order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MeridianError;

/// One of the nine canonical regions.
///
/// | # | Region | Display |
/// |---|--------|---------|
/// | 1 | North America | North America |
/// | 2 | Central America | Central America |
/// | 3 | Caribbean | Caribbean |
/// | 4 | South America | South America |
/// | 5 | Europe | Europe |
/// | 6 | Africa | Africa |
/// | 7 | Middle East & North Africa | MENA |
/// | 8 | Asia | Asia |
/// | 9 | Oceania | Oceania |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "Central America")]
    CentralAmerica,
    #[serde(rename = "Caribbean")]
    Caribbean,
    #[serde(rename = "South America")]
    SouthAmerica,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Africa")]
    Africa,
    #[serde(rename = "Middle East & North Africa")]
    MiddleEastNorthAfrica,
    #[serde(rename = "Asia")]
    Asia,
    #[serde(rename = "Oceania")]
    Oceania,
}

/// Total number of canonical regions.
pub const REGION_COUNT: usize = 9;

impl Region {
    /// All regions in canonical order.
    pub fn all() -> &'static [Region] {
        &[
            Self::NorthAmerica,
            Self::CentralAmerica,
            Self::Caribbean,
            Self::SouthAmerica,
            Self::Europe,
            Self::Africa,
            Self::MiddleEastNorthAfrica,
            Self::Asia,
            Self::Oceania,
        ]
    }

    /// Canonical name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::CentralAmerica => "Central America",
            Self::Caribbean => "Caribbean",
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Africa => "Africa",
            Self::MiddleEastNorthAfrica => "Middle East & North Africa",
            Self::Asia => "Asia",
            Self::Oceania => "Oceania",
        }
    }

    /// Short label used by chart legends. Only MENA differs from `as_str`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MiddleEastNorthAfrica => "MENA",
            other => other.as_str(),
        }
    }

    /// Normalize a raw region label from the dataset.
    ///
    /// Any label mentioning both "middle east" and "north africa" (in any
    /// case) maps to [`Region::MiddleEastNorthAfrica`]. Every other label
    /// must equal one of the remaining canonical names after trimming.
    /// Returns `None` when the label cannot be placed; such records stay in
    /// global totals but drop out of regional breakdowns.
    pub fn normalize(raw: &str) -> Option<Region> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lower = trimmed.to_lowercase();
        if lower.contains("middle east") && lower.contains("north africa") {
            return Some(Self::MiddleEastNorthAfrica);
        }
        Self::all()
            .iter()
            .copied()
            .filter(|r| *r != Self::MiddleEastNorthAfrica)
            .find(|r| r.as_str() == trimmed)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = MeridianError;

    /// Strict parse of a canonical name or display name (`"MENA"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s || r.display_name() == s)
            .ok_or_else(|| MeridianError::unknown("region", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_regions_count() {
        assert_eq!(Region::all().len(), REGION_COUNT);
    }

    #[test]
    fn all_regions_sorted_by_ord() {
        let mut sorted = Region::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Region::all());
    }

    #[test]
    fn normalize_exact_names() {
        for region in Region::all() {
            assert_eq!(Region::normalize(region.as_str()), Some(*region));
        }
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(Region::normalize("  Europe \n"), Some(Region::Europe));
    }

    #[test]
    fn normalize_mena_variants() {
        for raw in [
            "Middle East and North Africa",
            "middle east / north africa",
            "MIDDLE EAST & NORTH AFRICA",
            "North Africa and the Middle East",
        ] {
            assert_eq!(
                Region::normalize(raw),
                Some(Region::MiddleEastNorthAfrica),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn normalize_rejects_partial_mena() {
        assert_eq!(Region::normalize("Middle East"), None);
        assert_eq!(Region::normalize("North Africa"), None);
    }

    #[test]
    fn normalize_is_case_sensitive_outside_mena() {
        assert_eq!(Region::normalize("europe"), None);
        assert_eq!(Region::normalize("Southeast Asia"), None);
        assert_eq!(Region::normalize(""), None);
        assert_eq!(Region::normalize("   "), None);
    }

    #[test]
    fn from_str_accepts_display_name() {
        assert_eq!("MENA".parse::<Region>().unwrap(), Region::MiddleEastNorthAfrica);
        assert_eq!("Asia".parse::<Region>().unwrap(), Region::Asia);
        assert!("Atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn serde_uses_canonical_names() {
        for region in Region::all() {
            let json = serde_json::to_string(region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.as_str()));
            let back: Region = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *region);
        }
    }
}
