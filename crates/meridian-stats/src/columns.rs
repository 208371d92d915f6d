//! # Column Resolution
//!
//! The dataset is a hand-maintained export and its headers drift: trailing
//! spaces, a dropped `?`, an en-dash where a hyphen used to be. Every
//! semantic field is declared once in [`SemanticField::spec`] with an
//! ordered list of case-insensitive matchers and a canonical literal.
//!
//! [`ColumnMap::resolve`] runs the matchers against a header set exactly
//! once per load. Everything downstream looks values up by
//! [`SemanticField`], never by header text.
//!
//! Resolution never fails. A field with no matching header falls back to
//! its literal, and lookups through that literal simply find nothing.

use std::collections::BTreeMap;

use meridian_core::Crime;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::record::{FieldValue, RawRecord};

/// A column the engine knows how to interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticField {
    Country,
    IsoCode,
    Region,
    Status,
    AtLeastOneCrime,
    Genocide,
    WarCrimes,
    CrimesAgainstHumanity,
    Aggression,
    CommandResponsibility,
    ExtraterritorialProvision,
    GenocideWithPresence,
    GenocideWithoutPresence,
    WarCrimesWithPresence,
    WarCrimesWithoutPresence,
    CrimesAgainstHumanityWithPresence,
    CrimesAgainstHumanityWithoutPresence,
    AggressionWithPresence,
    AggressionWithoutPresence,
    RomeStatuteRatified,
    RomeStatuteDomesticated,
    LaunchedCase,
    CaseCount,
    SpecializedUnit,
}

/// Matchers and fallback literal for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Tried in order; the first pattern that matches any header wins.
    pub patterns: &'static [&'static str],
    /// Used when no pattern matches.
    pub literal: &'static str,
}

impl SemanticField {
    pub fn all() -> &'static [SemanticField] {
        &[
            Self::Country,
            Self::IsoCode,
            Self::Region,
            Self::Status,
            Self::AtLeastOneCrime,
            Self::Genocide,
            Self::WarCrimes,
            Self::CrimesAgainstHumanity,
            Self::Aggression,
            Self::CommandResponsibility,
            Self::ExtraterritorialProvision,
            Self::GenocideWithPresence,
            Self::GenocideWithoutPresence,
            Self::WarCrimesWithPresence,
            Self::WarCrimesWithoutPresence,
            Self::CrimesAgainstHumanityWithPresence,
            Self::CrimesAgainstHumanityWithoutPresence,
            Self::AggressionWithPresence,
            Self::AggressionWithoutPresence,
            Self::RomeStatuteRatified,
            Self::RomeStatuteDomesticated,
            Self::LaunchedCase,
            Self::CaseCount,
            Self::SpecializedUnit,
        ]
    }

    /// The criminalization flag column for a crime.
    pub fn criminalization(crime: Crime) -> Self {
        match crime {
            Crime::Genocide => Self::Genocide,
            Crime::WarCrimes => Self::WarCrimes,
            Crime::CrimesAgainstHumanity => Self::CrimesAgainstHumanity,
            Crime::Aggression => Self::Aggression,
        }
    }

    /// The two jurisdiction columns for a crime: presence required, then
    /// no presence required.
    pub fn jurisdiction(crime: Crime) -> [Self; 2] {
        match crime {
            Crime::Genocide => [Self::GenocideWithPresence, Self::GenocideWithoutPresence],
            Crime::WarCrimes => [Self::WarCrimesWithPresence, Self::WarCrimesWithoutPresence],
            Crime::CrimesAgainstHumanity => [
                Self::CrimesAgainstHumanityWithPresence,
                Self::CrimesAgainstHumanityWithoutPresence,
            ],
            Crime::Aggression => [Self::AggressionWithPresence, Self::AggressionWithoutPresence],
        }
    }

    pub fn spec(&self) -> FieldSpec {
        match self {
            Self::Country => FieldSpec {
                patterns: &[r"^\s*Country\s*$", r"^\s*Country name\s*$"],
                literal: "Country",
            },
            Self::IsoCode => FieldSpec {
                patterns: &[r"^\s*ISO 3166-1 alpha-3\s*$", r"^\s*ISO[ _]?A3\s*$"],
                literal: "ISO 3166-1 alpha-3",
            },
            Self::Region => FieldSpec {
                patterns: &[r"^\s*Region\s*$"],
                literal: "Region",
            },
            Self::Status => FieldSpec {
                patterns: &[r"^\s*Status\s*$"],
                literal: "Status",
            },
            Self::AtLeastOneCrime => FieldSpec {
                patterns: &[
                    r"^Does the country have at least one criminalized international crime\??\s*$",
                ],
                literal: "Does the country have at least one criminalized international crime?",
            },
            Self::Genocide => FieldSpec {
                patterns: &[r"^Genocide\s*[-–—]\s*Does the country criminalize genocide\??\s*$"],
                literal: "Genocide - Does the country criminalize genocide?",
            },
            Self::WarCrimes => FieldSpec {
                patterns: &[
                    r"^War Crimes\s*[-–—]\s*Does the country criminalize war crimes\??\s*$",
                ],
                literal: "War Crimes - Does the country criminalize war crimes?",
            },
            Self::CrimesAgainstHumanity => FieldSpec {
                patterns: &[
                    r"^Crimes Against Humanity\s*[-–—]\s*Does the country criminalize crimes against humanity\??\s*$",
                ],
                literal: "Crimes Against Humanity - Does the country criminalize crimes against humanity?",
            },
            Self::Aggression => FieldSpec {
                patterns: &[
                    r"^Aggression\s*[-–—]\s*Does the country criminalize the international.*crime of aggression.*\??\s*$",
                ],
                literal: "Aggression - Does the country criminalize the international \"crime of aggression\" or the \"crimes against peace\"?",
            },
            Self::CommandResponsibility => FieldSpec {
                patterns: &[
                    r"^Command or Superior Responsibility\s*[-–—]\s*Does the country have a domestic provision.*\??\s*$",
                ],
                literal: "Command or Superior Responsibility - Does the country have a domestic provision regarding command or superior responsibility?",
            },
            Self::ExtraterritorialProvision => FieldSpec {
                patterns: &[
                    r"^Jurisdiction\s*[-–—]\s*Are there universal or extraterritorial jurisdiction provisions\??\s*$",
                    r"^Jurisdiction\s*[-–—]\s*Are there universal or extraterritorial",
                ],
                literal: "Jurisdiction - Are there universal or extraterritorial jurisdiction provisions?",
            },
            Self::GenocideWithPresence => FieldSpec {
                patterns: &[r"^Jurisdiction GENOCIDE\s*[-–—]\s*YES perpetrator presence\s*$"],
                literal: "Jurisdiction GENOCIDE - YES perpetrator presence",
            },
            Self::GenocideWithoutPresence => FieldSpec {
                patterns: &[r"^Jurisdiction GENOCIDE\s*[-–—]\s*NO perpetrator presence\s*$"],
                literal: "Jurisdiction GENOCIDE - NO perpetrator presence",
            },
            Self::WarCrimesWithPresence => FieldSpec {
                patterns: &[r"^Jurisdiction WAR CRIMES\s*[-–—]\s*YES perpetrator presence\s*$"],
                literal: "Jurisdiction WAR CRIMES - YES perpetrator presence",
            },
            Self::WarCrimesWithoutPresence => FieldSpec {
                patterns: &[r"^Jurisdiction WAR CRIMES\s*[-–—]\s*NO perpetrator presence\s*$"],
                literal: "Jurisdiction WAR CRIMES - NO perpetrator presence",
            },
            Self::CrimesAgainstHumanityWithPresence => FieldSpec {
                patterns: &[
                    r"^Jurisdiction CRIMES AGAINST HUMANITY\s*[-–—]\s*YES perpetrator presence\s*$",
                ],
                literal: "Jurisdiction CRIMES AGAINST HUMANITY - YES perpetrator presence",
            },
            Self::CrimesAgainstHumanityWithoutPresence => FieldSpec {
                patterns: &[
                    r"^Jurisdiction CRIMES AGAINST HUMANITY\s*[-–—]\s*NO perpetrator presence\s*$",
                ],
                literal: "Jurisdiction CRIMES AGAINST HUMANITY - NO perpetrator presence",
            },
            Self::AggressionWithPresence => FieldSpec {
                patterns: &[r"^Jurisdiction AGGRESSION\s*[-–—]\s*YES perpetrator presence\s*$"],
                literal: "Jurisdiction AGGRESSION - YES perpetrator presence",
            },
            Self::AggressionWithoutPresence => FieldSpec {
                patterns: &[r"^Jurisdiction AGGRESSION\s*[-–—]\s*NO perpetrator presence\s*$"],
                literal: "Jurisdiction AGGRESSION - NO perpetrator presence",
            },
            Self::RomeStatuteRatified => FieldSpec {
                patterns: &[r"^Rome Statute.*Has the country signed or ratified.*\??\s*$"],
                literal: "Rome Statute of the International Criminal Court - Has the country signed or ratified the Rome Statute?",
            },
            Self::RomeStatuteDomesticated => FieldSpec {
                patterns: &[r"^Rome Statute.*did the country domesticate.*\??\s*$"],
                literal: "Rome Statute of the International Criminal Court - If ratified, did the country domesticate the Rome Statute provisions?",
            },
            Self::LaunchedCase => FieldSpec {
                patterns: &[
                    r"^Jurisprudence\s*[-–—]\s*Has the country had a UJ or ETJ case\??\s*$",
                    r"Jurisprudence\s*[-–—]\s*Has the country had a UJ or ETJ case",
                ],
                literal: "Jurisprudence - Has the country had a UJ or ETJ case?",
            },
            Self::CaseCount => FieldSpec {
                patterns: &[r"Jurisprudence\s*[-–—]\s*How many UJ or ETJ cases"],
                literal: "Jurisprudence - How many UJ or ETJ cases has the country launched?",
            },
            Self::SpecializedUnit => FieldSpec {
                patterns: &[
                    r"^Practice\s*[-–—]\s*Is there a specialized unit for investigating international crimes\??\s*$",
                    r"Practice\s*[-–—]\s*Is there a specialized unit for investigating international crimes",
                ],
                literal: "Practice - Is there a specialized unit for investigating international crimes?",
            },
        }
    }
}

/// Compile a field's matchers. Patterns are constants; one that fails to
/// compile is logged and skipped.
fn matchers(field: SemanticField) -> Vec<Regex> {
    field
        .spec()
        .patterns
        .iter()
        .filter_map(|p| match RegexBuilder::new(p).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!(?field, pattern = *p, "invalid column matcher: {e}");
                None
            }
        })
        .collect()
}

/// The resolved header for every [`SemanticField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    columns: BTreeMap<SemanticField, String>,
    unresolved: Vec<SemanticField>,
}

impl ColumnMap {
    /// Resolve every field against a header set.
    ///
    /// For each field, patterns are tried in priority order and the first
    /// header (in source order) matching the first successful pattern is
    /// chosen. Fields with no match use their canonical literal.
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut columns = BTreeMap::new();
        let mut unresolved = Vec::new();
        for &field in SemanticField::all() {
            let found = matchers(field).iter().find_map(|re| {
                headers
                    .iter()
                    .map(|h| h.as_ref())
                    .find(|h| re.is_match(h))
                    .map(str::to_string)
            });
            let header = match found {
                Some(h) => h,
                None => {
                    let literal = field.spec().literal;
                    if !headers.iter().any(|h| h.as_ref() == literal) {
                        unresolved.push(field);
                    }
                    literal.to_string()
                }
            };
            columns.insert(field, header);
        }
        Self {
            columns,
            unresolved,
        }
    }

    /// Every field mapped to its literal, as if no headers were available.
    pub fn canonical() -> Self {
        Self::resolve::<&str>(&[])
    }

    /// The header a field resolved to.
    pub fn header(&self, field: SemanticField) -> &str {
        self.columns
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.spec().literal)
    }

    /// Fields whose fallback literal is absent from the headers.
    pub fn unresolved(&self) -> &[SemanticField] {
        &self.unresolved
    }

    /// Look up a field's cell in a raw record.
    pub fn get<'r>(&self, record: &'r RawRecord, field: SemanticField) -> Option<&'r FieldValue> {
        record.get(self.header(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for field in SemanticField::all() {
            assert_eq!(
                matchers(*field).len(),
                field.spec().patterns.len(),
                "{field:?}"
            );
        }
    }

    #[test]
    fn every_literal_matches_its_own_patterns() {
        let headers: Vec<&str> = SemanticField::all().iter().map(|f| f.spec().literal).collect();
        let map = ColumnMap::resolve(&headers);
        for field in SemanticField::all() {
            assert_eq!(map.header(*field), field.spec().literal, "{field:?}");
        }
        assert!(map.unresolved().is_empty());
    }

    #[test]
    fn tolerates_trailing_space_and_missing_question_mark() {
        let headers = [
            "Jurisprudence - Has the country had a UJ or ETJ case? ",
            "Genocide - Does the country criminalize genocide",
        ];
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.header(SemanticField::LaunchedCase), headers[0]);
        assert_eq!(map.header(SemanticField::Genocide), headers[1]);
    }

    #[test]
    fn tolerates_en_dash_and_case() {
        let headers = ["PRACTICE – Is there a specialized unit for investigating international crimes?"];
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.header(SemanticField::SpecializedUnit), headers[0]);
    }

    #[test]
    fn presence_columns_do_not_collide() {
        let headers = [
            "Jurisdiction GENOCIDE - NO perpetrator presence",
            "Jurisdiction GENOCIDE - YES perpetrator presence",
        ];
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.header(SemanticField::GenocideWithPresence), headers[1]);
        assert_eq!(map.header(SemanticField::GenocideWithoutPresence), headers[0]);
    }

    #[test]
    fn first_header_in_source_order_wins() {
        let headers = ["Region ", "Region"];
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.header(SemanticField::Region), "Region ");
    }

    #[test]
    fn missing_field_falls_back_to_literal_and_is_reported() {
        let map = ColumnMap::resolve(&["Country"]);
        assert_eq!(map.header(SemanticField::Country), "Country");
        assert_eq!(map.header(SemanticField::Status), "Status");
        assert!(map.unresolved().contains(&SemanticField::Status));
        assert!(!map.unresolved().contains(&SemanticField::Country));
    }

    #[test]
    fn canonical_map_reports_everything_unresolved() {
        assert_eq!(ColumnMap::canonical().unresolved().len(), SemanticField::all().len());
    }

    #[test]
    fn get_reads_through_resolved_header() {
        let mut record = RawRecord::new();
        record.insert("Status ".into(), FieldValue::from("UN Member State"));
        let map = ColumnMap::resolve(&["Status "]);
        assert_eq!(
            map.get(&record, SemanticField::Status),
            Some(&FieldValue::from("UN Member State"))
        );
        assert_eq!(map.get(&record, SemanticField::Region), None);
    }
}
