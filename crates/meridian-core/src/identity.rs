//! # Country Identity
//!
//! ISO 3166-1 alpha-3 codes key the choropleth map. The dataset stores them
//! in mixed case with stray whitespace, so construction normalizes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MeridianError;

/// An ISO 3166-1 alpha-3 country code, always three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoCode(String);

impl IsoCode {
    /// Validate and normalize a raw code.
    pub fn new(raw: &str) -> Result<Self, MeridianError> {
        let trimmed = raw.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(MeridianError::InvalidIsoCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IsoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IsoCode {
    type Err = MeridianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for IsoCode {
    type Error = MeridianError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<IsoCode> for String {
    fn from(code: IsoCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(IsoCode::new(" fra ").unwrap().as_str(), "FRA");
    }

    #[test]
    fn rejects_bad_codes() {
        for raw in ["", "FR", "FRAN", "F1A", "N/A", "ÉTA"] {
            assert!(IsoCode::new(raw).is_err(), "{raw:?}");
        }
    }

    #[test]
    fn serde_validates() {
        let code: IsoCode = serde_json::from_str("\"afg\"").unwrap();
        assert_eq!(code.as_str(), "AFG");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"AFG\"");
        assert!(serde_json::from_str::<IsoCode>("\"XX\"").is_err());
    }
}
