//! Property-based tests for the merge pass using the `proptest` crate.

use std::collections::HashSet;

use proptest::prelude::*;

use bodymap::{
    merge, ActiveRegion, Catalog, CatalogEntry, Color, Error, Palette, Slug, ViewBox,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn palette() -> Palette {
    Palette::parse(["#111", "#222", "#333"]).unwrap()
}

/// Any subset of the slug vocabulary, as a catalog with one path per region
fn arb_catalog() -> impl Strategy<Value = Catalog> {
    proptest::sample::subsequence(Slug::ALL.to_vec(), 0..=Slug::ALL.len()).prop_map(|slugs| {
        let entries = slugs
            .into_iter()
            .map(|slug| CatalogEntry::new(slug, vec![format!("M0,0 L{},1", slug)]))
            .collect();
        Catalog::new("arbitrary", ViewBox::new(0.0, 0.0, 1.0, 1.0), entries).unwrap()
    })
}

/// Highlight requests for arbitrary slugs (in or out of any catalog), with in-range intensities
fn arb_active() -> impl Strategy<Value = Vec<ActiveRegion>> {
    let region = (
        proptest::sample::select(Slug::ALL.to_vec()),
        proptest::option::of(0u32..=3),
        proptest::option::of(any::<(u8, u8, u8)>()),
    )
        .prop_map(|(slug, intensity, color)| ActiveRegion {
            slug,
            intensity,
            color: color.map(|(r, g, b)| Color::new(r, g, b)),
            path_array: None,
        });
    proptest::collection::vec(region, 0..20)
}

// ---------------------------------------------------------------------------
// 1. Completeness: one entry per catalog region, none duplicated
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn output_covers_catalog_exactly(cat in arb_catalog(), active in arb_active()) {
        let merged = merge(&cat, &active, &palette(), Color::NEUTRAL).unwrap();
        prop_assert_eq!(merged.len(), cat.len());

        let merged_slugs: HashSet<Slug> = merged.iter().map(|e| e.slug).collect();
        let catalog_slugs: HashSet<Slug> = cat.entries().iter().map(|e| e.slug).collect();
        prop_assert_eq!(merged_slugs, catalog_slugs);
    }
}

// ---------------------------------------------------------------------------
// 2. Idempotence: same inputs, same output
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn merge_is_deterministic(cat in arb_catalog(), active in arb_active()) {
        let first = merge(&cat, &active, &palette(), Color::NEUTRAL).unwrap();
        let second = merge(&cat, &active, &palette(), Color::NEUTRAL).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// 3/4. Colouring: palette by intensity for highlights, neutral for the rest
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn colours_follow_first_request(cat in arb_catalog(), active in arb_active()) {
        let merged = merge(&cat, &active, &palette(), Color::NEUTRAL).unwrap();
        for entry in &merged {
            match active.iter().find(|r| r.slug == entry.slug) {
                Some(request) => {
                    let expected = match request.intensity {
                        Some(k) if k >= 1 => palette().colors()[k as usize - 1],
                        _ => request.color.unwrap_or(Color::NEUTRAL),
                    };
                    prop_assert_eq!(entry.color, expected);
                    prop_assert_eq!(entry.active, Some(request));
                }
                None => {
                    prop_assert_eq!(entry.color, Color::NEUTRAL);
                    prop_assert!(entry.active.is_none());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Ordering: untouched regions first, both halves in catalog order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn untouched_precede_highlighted(cat in arb_catalog(), active in arb_active()) {
        let merged = merge(&cat, &active, &palette(), Color::NEUTRAL).unwrap();
        let split = merged.iter().position(|e| e.active.is_some()).unwrap_or(merged.len());
        prop_assert!(merged[split..].iter().all(|e| e.active.is_some()));

        let catalog_pos = |slug: Slug| cat.entries().iter().position(|e| e.slug == slug);
        for half in [&merged[..split], &merged[split..]] {
            let positions = half.iter().map(|e| catalog_pos(e.slug)).collect::<Vec<_>>();
            let mut sorted = positions.clone();
            sorted.sort();
            prop_assert_eq!(positions, sorted);
        }
    }
}

// ---------------------------------------------------------------------------
// 6. Out-of-range intensities always fail when they reach the catalog
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn oversized_intensity_fails(cat in arb_catalog(), intensity in 4u32..100) {
        prop_assume!(!cat.is_empty());
        let slug = cat.entries()[0].slug;
        let active = vec![ActiveRegion::with_intensity(slug, intensity)];
        let result = merge(&cat, &active, &palette(), Color::NEUTRAL);
        let is_out_of_range = matches!(result, Err(Error::IntensityOutOfRange { .. }));
        prop_assert!(is_out_of_range);
    }
}
