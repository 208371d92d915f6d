//! # Jurisdiction Bases
//!
//! The legal nexus a state relies on to prosecute crimes committed abroad.
//! The dataset records these as free-text descriptors ("UJ — no presence
//! required", "Active Personality", "Treaty (Geneva Conventions)"), so each
//! basis is recognised by substring rules over a normalized descriptor.
//!
//! Bases are not mutually exclusive: a single descriptor such as
//! `"uj with presence required"` satisfies [`JurisdictionBasis::PresenceBased`]
//! and nothing else, while `"UJ;Active Personality"` yields two descriptors
//! that satisfy two bases.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MeridianError;

/// A category of extraterritorial jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionBasis {
    /// Universal jurisdiction with no presence requirement.
    AbsoluteUj,
    /// Jurisdiction conditioned on the perpetrator's presence.
    PresenceBased,
    /// Nationality of the perpetrator.
    ActivePersonality,
    /// Nationality of the victim.
    PassivePersonality,
    /// Protection of essential state interests.
    ProtectivePrinciple,
    /// Treaty obligation (including "section 9" statutes).
    TreatyBased,
}

/// Substring rule over a trimmed, lowercased descriptor.
///
/// A descriptor satisfies the rule when it contains at least one `include`
/// term and none of the `exclude` terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasisRule {
    pub include: &'static [&'static str],
    pub exclude: &'static [&'static str],
}

impl BasisRule {
    /// Apply the rule to an already-normalized descriptor.
    pub fn matches(&self, descriptor: &str) -> bool {
        self.include.iter().any(|term| descriptor.contains(term))
            && !self.exclude.iter().any(|term| descriptor.contains(term))
    }
}

impl JurisdictionBasis {
    /// All bases, in chart order.
    pub fn all() -> &'static [JurisdictionBasis] {
        &[
            Self::AbsoluteUj,
            Self::PresenceBased,
            Self::ActivePersonality,
            Self::PassivePersonality,
            Self::ProtectivePrinciple,
            Self::TreatyBased,
        ]
    }

    /// snake_case identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AbsoluteUj => "absolute_uj",
            Self::PresenceBased => "presence_based",
            Self::ActivePersonality => "active_personality",
            Self::PassivePersonality => "passive_personality",
            Self::ProtectivePrinciple => "protective_principle",
            Self::TreatyBased => "treaty_based",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AbsoluteUj => "Absolute Universal Jurisdiction",
            Self::PresenceBased => "Presence-Based Jurisdiction",
            Self::ActivePersonality => "Active Personality",
            Self::PassivePersonality => "Passive Personality",
            Self::ProtectivePrinciple => "Protective Principle",
            Self::TreatyBased => "Treaty Obligation",
        }
    }

    /// The substring rule that recognises this basis.
    pub fn rule(&self) -> BasisRule {
        match self {
            Self::AbsoluteUj => BasisRule {
                include: &["uj"],
                exclude: &["presence"],
            },
            Self::PresenceBased => BasisRule {
                include: &["presence"],
                exclude: &[],
            },
            Self::ActivePersonality => BasisRule {
                include: &["active personality", "active-personality"],
                exclude: &[],
            },
            Self::PassivePersonality => BasisRule {
                include: &["passive personality", "passive-personality"],
                exclude: &[],
            },
            Self::ProtectivePrinciple => BasisRule {
                include: &["protective"],
                exclude: &[],
            },
            Self::TreatyBased => BasisRule {
                include: &["treaty", "section 9"],
                exclude: &[],
            },
        }
    }

    /// Whether one descriptor (one `;`-separated part) satisfies this basis.
    ///
    /// The part is trimmed and lowercased here. Empty parts and the literal
    /// `n/a` never match, whatever the rule says.
    pub fn matches_part(&self, part: &str) -> bool {
        let normalized = part.trim().to_lowercase();
        if normalized.is_empty() || normalized == "n/a" {
            return false;
        }
        self.rule().matches(&normalized)
    }

    /// Whether any descriptor of a `;`-delimited field satisfies this basis.
    pub fn matches_field(&self, raw: &str) -> bool {
        raw.split(';').any(|part| self.matches_part(part))
    }
}

impl std::fmt::Display for JurisdictionBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JurisdictionBasis {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| MeridianError::unknown("jurisdiction basis", s))
    }
}
