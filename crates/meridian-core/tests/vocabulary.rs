//! Property tests over the shared vocabulary.

use meridian_core::{JurisdictionBasis, Region};
use proptest::prelude::*;

fn region_label() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(Region::all().to_vec()).prop_map(|r| r.as_str().to_string()),
        "[ \\t]{0,3}[A-Za-z &/]{0,30}[ \\t]{0,3}",
    ]
}

proptest! {
    /// Normalization never panics and only ever yields a canonical region.
    #[test]
    fn normalize_is_total(raw in region_label()) {
        if let Some(region) = Region::normalize(&raw) {
            prop_assert!(Region::all().contains(&region));
        }
    }

    /// Normalizing a canonical name is a fixed point.
    #[test]
    fn normalize_is_idempotent(raw in region_label()) {
        if let Some(region) = Region::normalize(&raw) {
            prop_assert_eq!(Region::normalize(region.as_str()), Some(region));
        }
    }

    /// Surrounding whitespace never changes the outcome.
    #[test]
    fn normalize_ignores_padding(raw in region_label(), pad in "[ \\t\\n]{0,4}") {
        let padded = format!("{pad}{raw}{pad}");
        prop_assert_eq!(Region::normalize(&padded), Region::normalize(&raw));
    }

    /// A field matches a basis exactly when one of its parts does.
    #[test]
    fn basis_field_is_any_part(parts in prop::collection::vec("[a-zA-Z /9-]{0,20}", 0..5)) {
        let raw = parts.join(";");
        for basis in JurisdictionBasis::all() {
            let by_part = parts.iter().any(|p| basis.matches_part(p));
            prop_assert_eq!(basis.matches_field(&raw), by_part);
        }
    }

    /// Case never affects basis membership.
    #[test]
    fn basis_matching_is_case_insensitive(raw in "[a-zA-Z ;/9-]{0,40}") {
        for basis in JurisdictionBasis::all() {
            prop_assert_eq!(
                basis.matches_field(&raw.to_uppercase()),
                basis.matches_field(&raw.to_lowercase())
            );
        }
    }
}
