//! Per-country crime counts keyed by ISO alpha-3 code.

use std::collections::BTreeMap;

use meridian_core::{Crime, IsoCode, Region, CRIME_COUNT};
use serde::Serialize;

use crate::classify::CountryRecord;

/// One country on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeCount {
    pub iso_code: IsoCode,
    pub name: String,
    pub region: Option<Region>,
    /// Number of criminalized crimes, 0 to 4.
    pub count: u8,
    pub crimes: Vec<Crime>,
    /// Tooltip labels of `crimes`.
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethView {
    pub by_iso: BTreeMap<IsoCode, CrimeCount>,
    /// `distribution[n]` is the number of countries criminalizing `n` crimes.
    pub distribution: [u32; CRIME_COUNT + 1],
    pub by_crime: BTreeMap<Crime, u32>,
    pub all_four: u32,
    pub at_least_one: u32,
}

impl ChoroplethView {
    pub fn total(&self) -> usize {
        self.by_iso.len()
    }

    /// Crime count for a map feature, `None` when the country has no record.
    pub fn count_for(&self, iso: &str) -> Option<u8> {
        let code = IsoCode::new(iso).ok()?;
        self.by_iso.get(&code).map(|c| c.count)
    }
}

/// Build the map view. Records without a valid ISO code cannot be placed
/// and are skipped; a repeated code keeps the last record.
pub fn choropleth(records: &[CountryRecord]) -> ChoroplethView {
    let mut by_iso = BTreeMap::new();
    for record in super::un_members(records) {
        let Some(iso_code) = record.iso_code.clone() else {
            continue;
        };
        let crimes: Vec<Crime> = record.criminalized().collect();
        by_iso.insert(
            iso_code.clone(),
            CrimeCount {
                iso_code,
                name: record.country.clone(),
                region: record.region,
                count: crimes.len() as u8,
                labels: crimes.iter().map(Crime::label).collect(),
                crimes,
            },
        );
    }

    let mut view = ChoroplethView {
        by_crime: Crime::all().iter().map(|c| (*c, 0)).collect(),
        ..ChoroplethView::default()
    };
    for entry in by_iso.values() {
        view.distribution[usize::from(entry.count)] += 1;
        if usize::from(entry.count) == CRIME_COUNT {
            view.all_four += 1;
        }
        if entry.count > 0 {
            view.at_least_one += 1;
        }
        for crime in &entry.crimes {
            *view.by_crime.entry(*crime).or_default() += 1;
        }
    }
    view.by_iso = by_iso;
    view
}
