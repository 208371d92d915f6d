//! # Classifications
//!
//! Every boolean predicate a state can satisfy and that gets a regional
//! breakdown. The set is closed: adding a predicate means adding a variant
//! here, and the aggregator's exhaustive match forces the rest of the
//! pipeline to follow.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::basis::JurisdictionBasis;
use crate::crime::Crime;
use crate::error::MeridianError;

/// A predicate over a classified country record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    Genocide,
    WarCrimes,
    CrimesAgainstHumanity,
    Aggression,
    /// The independently sourced "at least one crime" flag.
    AtLeastOneCrime,
    AllFourCrimes,
    CommandResponsibility,
    ExtraterritorialProvision,
    AnyJurisdiction,
    AbsoluteUj,
    PresenceBased,
    ActivePersonality,
    PassivePersonality,
    ProtectivePrinciple,
    TreatyBased,
    LaunchedCase,
    SpecializedUnit,
    RomeStatuteRatified,
}

impl Classification {
    pub fn all() -> &'static [Classification] {
        &[
            Self::Genocide,
            Self::WarCrimes,
            Self::CrimesAgainstHumanity,
            Self::Aggression,
            Self::AtLeastOneCrime,
            Self::AllFourCrimes,
            Self::CommandResponsibility,
            Self::ExtraterritorialProvision,
            Self::AnyJurisdiction,
            Self::AbsoluteUj,
            Self::PresenceBased,
            Self::ActivePersonality,
            Self::PassivePersonality,
            Self::ProtectivePrinciple,
            Self::TreatyBased,
            Self::LaunchedCase,
            Self::SpecializedUnit,
            Self::RomeStatuteRatified,
        ]
    }

    /// camelCase identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genocide => "genocide",
            Self::WarCrimes => "warCrimes",
            Self::CrimesAgainstHumanity => "crimesAgainstHumanity",
            Self::Aggression => "aggression",
            Self::AtLeastOneCrime => "atLeastOneCrime",
            Self::AllFourCrimes => "allFourCrimes",
            Self::CommandResponsibility => "commandResponsibility",
            Self::ExtraterritorialProvision => "extraterritorialProvision",
            Self::AnyJurisdiction => "anyJurisdiction",
            Self::AbsoluteUj => "absoluteUj",
            Self::PresenceBased => "presenceBased",
            Self::ActivePersonality => "activePersonality",
            Self::PassivePersonality => "passivePersonality",
            Self::ProtectivePrinciple => "protectivePrinciple",
            Self::TreatyBased => "treatyBased",
            Self::LaunchedCase => "launchedCase",
            Self::SpecializedUnit => "specializedUnit",
            Self::RomeStatuteRatified => "romeStatuteRatified",
        }
    }

    /// The criminalization predicate for one crime.
    pub fn for_crime(crime: Crime) -> Self {
        match crime {
            Crime::Genocide => Self::Genocide,
            Crime::WarCrimes => Self::WarCrimes,
            Crime::CrimesAgainstHumanity => Self::CrimesAgainstHumanity,
            Crime::Aggression => Self::Aggression,
        }
    }

    /// The membership predicate for one jurisdiction basis.
    pub fn for_basis(basis: JurisdictionBasis) -> Self {
        match basis {
            JurisdictionBasis::AbsoluteUj => Self::AbsoluteUj,
            JurisdictionBasis::PresenceBased => Self::PresenceBased,
            JurisdictionBasis::ActivePersonality => Self::ActivePersonality,
            JurisdictionBasis::PassivePersonality => Self::PassivePersonality,
            JurisdictionBasis::ProtectivePrinciple => Self::ProtectivePrinciple,
            JurisdictionBasis::TreatyBased => Self::TreatyBased,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| MeridianError::unknown("classification", s))
    }
}
