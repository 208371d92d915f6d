//! # Record Classification
//!
//! Turns one [`RawRecord`] into a typed [`CountryRecord`] through a
//! resolved [`ColumnMap`]. Classification is total: a missing column or an
//! unexpected value leaves the corresponding flag false or the field empty.
//!
//! ## Value rules
//!
//! - Yes/no columns accept only `yes` or `y` (trimmed, any case). Substring
//!   matches such as "yesterday" are rejected.
//! - A jurisdiction column "has a value" when it is non-empty and not
//!   `N/A`. The two columns per crime (presence required / not required)
//!   fold into one `;`-joined descriptor list.
//! - Case counts are parsed leniently; see [`parse_case_count`].

use meridian_core::{
    Classification, Crime, IsoCode, JurisdictionBasis, Region, CRIME_COUNT, UN_MEMBER_STATUS,
};
use serde::{Deserialize, Serialize};

use crate::columns::{ColumnMap, SemanticField};
use crate::record::{FieldValue, RawRecord, RecordSet};

/// Country name used when the record has none.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Strict yes test: trimmed, case-insensitive `yes` or `y`.
pub fn is_yes(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.eq_ignore_ascii_case("yes") || trimmed.eq_ignore_ascii_case("y")
}

/// Whether a jurisdiction cell carries any descriptor.
pub fn has_jurisdiction_value(value: &FieldValue) -> bool {
    fn present(s: &str) -> bool {
        let trimmed = s.trim();
        !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("n/a")
    }
    match value {
        FieldValue::Text(s) => present(s),
        FieldValue::List(items) => items.iter().any(|s| present(s)),
    }
}

/// Lenient case-count parse.
///
/// Trims, strips thousands separators and reads the leading number. Empty,
/// `N/A`, non-numeric and non-positive inputs give 0; fractions are floored.
pub fn parse_case_count(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") {
        return 0;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    let end = numeric_prefix_len(&cleaned);
    match cleaned[..end].parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => {
            let floored = n.floor();
            if floored >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                floored as u32
            }
        }
        _ => 0,
    }
}

/// Length of the longest `[+-]?digits[.digits]` prefix.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            i = j;
        }
    }
    i
}

/// One state, fully classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub country: String,
    pub iso_code: Option<IsoCode>,
    pub status: String,
    /// `None` when the raw label does not normalize to a canonical region.
    pub region: Option<Region>,
    /// Indexed by [`Crime::index`].
    pub criminalizes: [bool; CRIME_COUNT],
    /// Independently sourced; never derived from `criminalizes`.
    pub has_at_least_one_crime: bool,
    pub command_responsibility: bool,
    pub extraterritorial_provision: bool,
    /// `;`-joined descriptors per crime, indexed by [`Crime::index`].
    /// Empty when neither column carries a value.
    pub jurisdiction: [String; CRIME_COUNT],
    pub has_launched_case: bool,
    pub case_count: u32,
    pub has_specialized_unit: bool,
    pub ratified_rome_statute: bool,
    pub domesticated_rome_statute: bool,
}

impl CountryRecord {
    /// Classify one raw record.
    pub fn classify(raw: &RawRecord, columns: &ColumnMap) -> Self {
        let text = |field: SemanticField| -> String {
            columns
                .get(raw, field)
                .map(|v| v.joined().into_owned())
                .unwrap_or_default()
        };
        let flag = |field: SemanticField| -> bool { is_yes(&text(field)) };

        let country = match text(SemanticField::Country).trim() {
            "" => UNKNOWN_COUNTRY.to_string(),
            name => name.to_string(),
        };

        let mut criminalizes = [false; CRIME_COUNT];
        let mut jurisdiction: [String; CRIME_COUNT] = Default::default();
        for &crime in Crime::all() {
            criminalizes[crime.index()] = flag(SemanticField::criminalization(crime));
            let parts: Vec<String> = SemanticField::jurisdiction(crime)
                .iter()
                .filter_map(|f| columns.get(raw, *f))
                .filter(|v| has_jurisdiction_value(v))
                .map(|v| v.joined().into_owned())
                .collect();
            jurisdiction[crime.index()] = parts.join(";");
        }

        let has_launched_case = flag(SemanticField::LaunchedCase);
        let mut case_count = parse_case_count(&text(SemanticField::CaseCount));
        if case_count == 0 && has_launched_case {
            case_count = 1;
        }

        Self {
            country,
            iso_code: IsoCode::new(&text(SemanticField::IsoCode)).ok(),
            status: text(SemanticField::Status).trim().to_string(),
            region: Region::normalize(&text(SemanticField::Region)),
            criminalizes,
            has_at_least_one_crime: flag(SemanticField::AtLeastOneCrime),
            command_responsibility: flag(SemanticField::CommandResponsibility),
            extraterritorial_provision: flag(SemanticField::ExtraterritorialProvision),
            jurisdiction,
            has_launched_case,
            case_count,
            has_specialized_unit: flag(SemanticField::SpecializedUnit),
            ratified_rome_statute: flag(SemanticField::RomeStatuteRatified),
            domesticated_rome_statute: flag(SemanticField::RomeStatuteDomesticated),
        }
    }

    pub fn is_un_member(&self) -> bool {
        self.status == UN_MEMBER_STATUS
    }

    pub fn criminalizes(&self, crime: Crime) -> bool {
        self.criminalizes[crime.index()]
    }

    /// Crimes this state criminalizes, in [`Crime::all`] order.
    pub fn criminalized(&self) -> impl Iterator<Item = Crime> + '_ {
        Crime::all().iter().copied().filter(|c| self.criminalizes(*c))
    }

    pub fn criminalizes_all(&self) -> bool {
        self.criminalizes.iter().all(|c| *c)
    }

    pub fn jurisdiction_field(&self, crime: Crime) -> &str {
        &self.jurisdiction[crime.index()]
    }

    /// Whether either jurisdiction column for `crime` carried a value.
    pub fn has_jurisdiction_for(&self, crime: Crime) -> bool {
        !self.jurisdiction[crime.index()].is_empty()
    }

    /// Existence test across all four crimes, independent of basis matching.
    pub fn has_any_jurisdiction(&self) -> bool {
        Crime::all().iter().any(|c| self.has_jurisdiction_for(*c))
    }

    /// Whether any crime's descriptor list satisfies `basis`.
    pub fn has_basis(&self, basis: JurisdictionBasis) -> bool {
        self.jurisdiction.iter().any(|f| basis.matches_field(f))
    }

    /// Bases this state satisfies, in [`JurisdictionBasis::all`] order.
    pub fn bases(&self) -> Vec<JurisdictionBasis> {
        JurisdictionBasis::all()
            .iter()
            .copied()
            .filter(|b| self.has_basis(*b))
            .collect()
    }

    /// Whether the independent "at least one crime" flag agrees with the
    /// four crime flags.
    pub fn is_consistent(&self) -> bool {
        self.has_at_least_one_crime == self.criminalizes.iter().any(|c| *c)
    }

    /// Evaluate a classification predicate.
    pub fn satisfies(&self, classification: Classification) -> bool {
        match classification {
            Classification::Genocide => self.criminalizes(Crime::Genocide),
            Classification::WarCrimes => self.criminalizes(Crime::WarCrimes),
            Classification::CrimesAgainstHumanity => {
                self.criminalizes(Crime::CrimesAgainstHumanity)
            }
            Classification::Aggression => self.criminalizes(Crime::Aggression),
            Classification::AtLeastOneCrime => self.has_at_least_one_crime,
            Classification::AllFourCrimes => self.criminalizes_all(),
            Classification::CommandResponsibility => self.command_responsibility,
            Classification::ExtraterritorialProvision => self.extraterritorial_provision,
            Classification::AnyJurisdiction => self.has_any_jurisdiction(),
            Classification::AbsoluteUj => self.has_basis(JurisdictionBasis::AbsoluteUj),
            Classification::PresenceBased => self.has_basis(JurisdictionBasis::PresenceBased),
            Classification::ActivePersonality => {
                self.has_basis(JurisdictionBasis::ActivePersonality)
            }
            Classification::PassivePersonality => {
                self.has_basis(JurisdictionBasis::PassivePersonality)
            }
            Classification::ProtectivePrinciple => {
                self.has_basis(JurisdictionBasis::ProtectivePrinciple)
            }
            Classification::TreatyBased => self.has_basis(JurisdictionBasis::TreatyBased),
            Classification::LaunchedCase => self.has_launched_case,
            Classification::SpecializedUnit => self.has_specialized_unit,
            Classification::RomeStatuteRatified => self.ratified_rome_statute,
        }
    }
}

/// Resolve columns once and classify every row of a record set.
pub fn classify_all(set: &RecordSet) -> Vec<CountryRecord> {
    let columns = ColumnMap::resolve(set.headers());
    if !set.is_empty() && !columns.unresolved().is_empty() {
        tracing::warn!(
            unresolved = ?columns.unresolved(),
            "columns not found in source headers; treating as absent"
        );
    }
    let records: Vec<CountryRecord> = set
        .rows()
        .iter()
        .map(|row| CountryRecord::classify(row, &columns))
        .collect();
    tracing::debug!(
        rows = records.len(),
        un_members = records.iter().filter(|r| r.is_un_member()).count(),
        "classified record set"
    );
    records
}
