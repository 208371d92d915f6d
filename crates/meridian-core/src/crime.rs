//! # Crime Types
//!
//! The four international crimes tracked for every state. Each has a
//! criminalization flag and a jurisdiction-basis field in the dataset.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MeridianError;

/// An international crime tracked by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crime {
    /// Genocide.
    Genocide,
    /// War crimes.
    WarCrimes,
    /// Crimes against humanity.
    CrimesAgainstHumanity,
    /// The crime of aggression ("crimes against peace").
    Aggression,
}

/// Total number of tracked crimes.
pub const CRIME_COUNT: usize = 4;

impl Crime {
    /// All crimes, in dataset order.
    pub fn all() -> &'static [Crime] {
        &[
            Self::Genocide,
            Self::WarCrimes,
            Self::CrimesAgainstHumanity,
            Self::Aggression,
        ]
    }

    /// snake_case identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genocide => "genocide",
            Self::WarCrimes => "war_crimes",
            Self::CrimesAgainstHumanity => "crimes_against_humanity",
            Self::Aggression => "aggression",
        }
    }

    /// Human-readable label shown in map tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Genocide => "Genocide",
            Self::WarCrimes => "War Crimes",
            Self::CrimesAgainstHumanity => "Crimes Against Humanity",
            Self::Aggression => "Crime of Aggression",
        }
    }

    /// Short slug used by the Sankey chart's crime list.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Genocide => "genocide",
            Self::WarCrimes => "war-crimes",
            Self::CrimesAgainstHumanity => "cah",
            Self::Aggression => "aggression",
        }
    }

    /// Stable position of this crime in [`Crime::all`].
    pub fn index(&self) -> usize {
        match self {
            Self::Genocide => 0,
            Self::WarCrimes => 1,
            Self::CrimesAgainstHumanity => 2,
            Self::Aggression => 3,
        }
    }
}

impl std::fmt::Display for Crime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Crime {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s || c.slug() == s)
            .ok_or_else(|| MeridianError::unknown("crime", s))
    }
}
