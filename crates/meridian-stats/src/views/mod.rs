//! # Chart Views
//!
//! Chart-shaped groupings over classified records. Each view is a pure
//! function of the record slice and considers UN member states only.
//!
//! | View | Chart |
//! |------|-------|
//! | [`choropleth`] | crime-count world map |
//! | [`sankey`] | jurisdiction basis flows by region |
//! | [`jurisprudence`] | packed bubbles of UJ/ETJ cases |
//! | [`specialized_units`] | mirrored bars of investigative units |

pub mod choropleth;
pub mod jurisprudence;
pub mod sankey;
pub mod specialized_units;

pub use choropleth::{choropleth, ChoroplethView, CrimeCount};
pub use jurisprudence::{jurisprudence, JurisprudenceGroup, JurisprudenceNode, JurisprudenceView};
pub use sankey::{sankey, SankeyRegion, SankeyState, SankeyView};
pub use specialized_units::{specialized_units, SpecializedUnitRow, SpecializedUnitsView};

use crate::classify::CountryRecord;

fn un_members(records: &[CountryRecord]) -> impl Iterator<Item = &CountryRecord> {
    records.iter().filter(|r| r.is_un_member())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use meridian_core::{Crime, IsoCode, Region, UN_MEMBER_STATUS};

    use crate::classify::CountryRecord;

    pub(crate) fn member(country: &str, iso: &str, region: Option<Region>) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            iso_code: IsoCode::new(iso).ok(),
            status: UN_MEMBER_STATUS.to_string(),
            region,
            criminalizes: [false; 4],
            has_at_least_one_crime: false,
            command_responsibility: false,
            extraterritorial_provision: false,
            jurisdiction: Default::default(),
            has_launched_case: false,
            case_count: 0,
            has_specialized_unit: false,
            ratified_rome_statute: false,
            domesticated_rome_statute: false,
        }
    }

    pub(crate) fn criminalizing(mut rec: CountryRecord, crimes: &[Crime]) -> CountryRecord {
        for crime in crimes {
            rec.criminalizes[crime.index()] = true;
        }
        rec
    }
}
