//! Specialized investigative units by region, for the mirrored bar chart.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use meridian_core::Region;
use serde::Serialize;

use crate::classify::CountryRecord;

/// Fixed display order of the chart's rows.
pub const DISPLAY_ORDER: [Region; 9] = [
    Region::NorthAmerica,
    Region::Europe,
    Region::SouthAmerica,
    Region::CentralAmerica,
    Region::Africa,
    Region::Oceania,
    Region::Caribbean,
    Region::MiddleEastNorthAfrica,
    Region::Asia,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecializedUnitRow {
    pub region: Region,
    pub label: &'static str,
    pub with_unit: u32,
    pub without_unit: u32,
    pub total: u32,
}

impl SpecializedUnitRow {
    /// `with_unit / total` compared against another row without floats.
    fn cmp_proportion(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.with_unit) * u64::from(other.total.max(1));
        let rhs = u64::from(other.with_unit) * u64::from(self.total.max(1));
        lhs.cmp(&rhs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecializedUnitsView {
    /// Rows in [`DISPLAY_ORDER`].
    pub rows: Vec<SpecializedUnitRow>,
    /// Sorted, deduplicated names of states with a unit, per region.
    pub countries: BTreeMap<Region, Vec<String>>,
    /// Regions by share with a unit (desc), then size (desc), then label.
    pub order_by_data: Vec<Region>,
    pub total_with_unit: u32,
    /// Largest bar on either side, at least 1.
    pub max_value: u32,
    pub has_data: bool,
}

pub fn specialized_units(records: &[CountryRecord]) -> SpecializedUnitsView {
    let mut rows: Vec<SpecializedUnitRow> = DISPLAY_ORDER
        .iter()
        .map(|&region| SpecializedUnitRow {
            region,
            label: region.display_name(),
            with_unit: 0,
            without_unit: 0,
            total: 0,
        })
        .collect();
    let mut countries: BTreeMap<Region, BTreeSet<String>> = BTreeMap::new();

    for record in super::un_members(records) {
        let Some(region) = record.region else {
            continue;
        };
        let Some(row) = rows.iter_mut().find(|r| r.region == region) else {
            continue;
        };
        row.total += 1;
        if record.has_specialized_unit {
            row.with_unit += 1;
            countries
                .entry(region)
                .or_default()
                .insert(record.country.clone());
        } else {
            row.without_unit += 1;
        }
    }

    let mut ranked: Vec<&SpecializedUnitRow> = rows.iter().collect();
    ranked.sort_by(|a, b| {
        b.cmp_proportion(a)
            .then_with(|| b.total.cmp(&a.total))
            .then_with(|| a.label.cmp(b.label))
    });
    let order_by_data = ranked.iter().map(|r| r.region).collect();

    let max_value = rows
        .iter()
        .map(|r| r.with_unit.max(r.without_unit))
        .fold(1, u32::max);

    SpecializedUnitsView {
        total_with_unit: rows.iter().map(|r| r.with_unit).sum(),
        has_data: rows.iter().any(|r| r.total > 0),
        countries: countries
            .into_iter()
            .map(|(region, names)| (region, names.into_iter().collect()))
            .collect(),
        order_by_data,
        max_value,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::member;

    fn with_unit(name: &str, region: Region, has: bool) -> CountryRecord {
        let mut rec = member(name, "", Some(region));
        rec.has_specialized_unit = has;
        rec
    }

    #[test]
    fn rows_follow_display_order() {
        let view = specialized_units(&[]);
        let labels: Vec<&str> = view.rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            [
                "North America",
                "Europe",
                "South America",
                "Central America",
                "Africa",
                "Oceania",
                "Caribbean",
                "MENA",
                "Asia"
            ]
        );
        assert!(!view.has_data);
        assert_eq!(view.max_value, 1);
    }

    #[test]
    fn counts_and_ranking() {
        let records = vec![
            with_unit("Germany", Region::Europe, true),
            with_unit("France", Region::Europe, true),
            with_unit("France", Region::Europe, true),
            with_unit("Malta", Region::Europe, false),
            with_unit("Canada", Region::NorthAmerica, true),
            with_unit("Chile", Region::SouthAmerica, false),
            with_unit("Kenya", Region::Africa, true),
            with_unit("Chad", Region::Africa, false),
        ];
        let view = specialized_units(&records);
        let europe = view.rows.iter().find(|r| r.region == Region::Europe).unwrap();
        assert_eq!((europe.with_unit, europe.without_unit, europe.total), (3, 1, 4));
        assert_eq!(view.countries[&Region::Europe], ["France", "Germany"]);
        assert_eq!(view.total_with_unit, 5);
        assert_eq!(view.max_value, 3);
        assert!(view.has_data);
        // North America 1/1, Europe 3/4, Africa 1/2, then South America 0/1
        // ahead of the empty regions, which tie and fall back to label order.
        assert_eq!(
            &view.order_by_data[..5],
            [
                Region::NorthAmerica,
                Region::Europe,
                Region::Africa,
                Region::SouthAmerica,
                Region::Asia
            ]
        );
    }
}
