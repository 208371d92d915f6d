//! UJ/ETJ case counts per state, grouped by display region for the packed
//! bubble chart.

use std::collections::BTreeMap;

use meridian_core::Region;
use serde::Serialize;

use crate::classify::CountryRecord;

/// Group label for states whose region did not normalize.
pub const UNKNOWN_REGION: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisprudenceNode {
    pub name: String,
    pub region: Option<Region>,
    /// Short label (`MENA`), or `Unknown`.
    pub region_label: &'static str,
    pub cases: u32,
    pub has_case: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JurisprudenceGroup {
    pub name: &'static str,
    pub children: Vec<JurisprudenceNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisprudenceView {
    /// Sorted by group name.
    pub groups: Vec<JurisprudenceGroup>,
    pub total_states: usize,
    pub states_with_cases: usize,
    pub max_cases: u32,
}

impl JurisprudenceView {
    pub fn nodes(&self) -> impl Iterator<Item = &JurisprudenceNode> {
        self.groups.iter().flat_map(|g| g.children.iter())
    }
}

pub fn jurisprudence(records: &[CountryRecord]) -> JurisprudenceView {
    let mut grouped: BTreeMap<&'static str, Vec<JurisprudenceNode>> = BTreeMap::new();
    let mut view = JurisprudenceView::default();

    for record in super::un_members(records) {
        let region_label = record.region.map_or(UNKNOWN_REGION, |r| r.display_name());
        let node = JurisprudenceNode {
            name: record.country.clone(),
            region: record.region,
            region_label,
            cases: record.case_count,
            has_case: record.has_launched_case,
        };
        view.total_states += 1;
        if node.has_case {
            view.states_with_cases += 1;
        }
        view.max_cases = view.max_cases.max(node.cases);
        grouped.entry(region_label).or_default().push(node);
    }

    view.groups = grouped
        .into_iter()
        .map(|(name, children)| JurisprudenceGroup { name, children })
        .collect();
    view
}
