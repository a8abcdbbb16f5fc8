//! Combining a catalog with the caller's highlight requests to decide what every region looks
//! like in a single render pass.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{palette::resolve_color, Catalog, Color, Palette, Result, Slug};

/// A caller's request to highlight one region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRegion {
    pub slug: Slug,
    /// 1-based index into the palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Outline override.  Accepted for symmetry with catalog entries, but never drawn: the
    /// catalog's own outline is always used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_array: Option<Vec<String>>,
}

impl ActiveRegion {
    pub fn new(slug: Slug) -> Self {
        Self {
            slug,
            intensity: None,
            color: None,
            path_array: None,
        }
    }

    pub fn with_intensity(slug: Slug, intensity: u32) -> Self {
        Self {
            intensity: Some(intensity),
            ..Self::new(slug)
        }
    }

    pub fn with_color(slug: Slug, color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::new(slug)
        }
    }
}

/// A catalog region with its fill colour resolved for this render pass
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEntry<'a> {
    pub slug: Slug,
    /// Always the catalog's outline
    pub paths: &'a [String],
    pub color: Color,
    /// The highlight request that coloured this region, or `None` if it's untouched
    pub active: Option<&'a ActiveRegion>,
}

/// Merge a `catalog` with a list of `active` regions.
///
/// The result contains exactly one entry per catalog region.  Untouched regions come first,
/// coloured with `default`, followed by the highlighted regions coloured by
/// [`resolve_color`].  Both halves keep the catalog's order.  If a slug is listed more than
/// once in `active`, the first request wins; slugs which aren't in the catalog are ignored.
pub fn merge<'a>(
    catalog: &'a Catalog,
    active: &'a [ActiveRegion],
    palette: &Palette,
    default: Color,
) -> Result<Vec<MergedEntry<'a>>> {
    // Map each slug to its first highlight request
    let mut requests = HashMap::<Slug, &ActiveRegion>::with_capacity(active.len());
    for region in active {
        requests.entry(region.slug).or_insert(region);
    }

    let inert = inert_slugs(catalog, active);
    if !inert.is_empty() {
        debug!(?inert, "ignoring active regions with no catalog entry");
    }

    let (touched, untouched): (Vec<_>, Vec<_>) = catalog
        .entries()
        .iter()
        .partition(|e| requests.contains_key(&e.slug));

    let untouched = untouched.into_iter().map(|e| {
        Ok(MergedEntry {
            slug: e.slug,
            paths: &e.path_array,
            color: default,
            active: None,
        })
    });
    let touched = touched.into_iter().map(|e| {
        let request = requests[&e.slug];
        Ok(MergedEntry {
            slug: e.slug,
            paths: &e.path_array,
            color: resolve_color(request, palette, default)?,
            active: Some(request),
        })
    });
    untouched.chain(touched).collect()
}

/// Slugs in `active` which the catalog doesn't draw, each listed once in request order
fn inert_slugs(catalog: &Catalog, active: &[ActiveRegion]) -> Vec<Slug> {
    let known = catalog.entries().iter().map(|e| e.slug).collect::<HashSet<_>>();
    active
        .iter()
        .map(|r| r.slug)
        .filter(|slug| !known.contains(slug))
        .unique()
        .collect_vec()
}
