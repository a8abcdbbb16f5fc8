use std::thread;

use bodymap::{
    catalog,
    image::{self, BackendKind},
    merge, ActiveRegion, Body, BodyOpts, Catalog, CatalogEntry, CatalogSet, Color, Error, Gender,
    Palette, Side, Slug, ViewBox,
};

// ── Fixtures ────────────────────────────────────────────────────────────

/// A row of 10x10 squares, one per slug, starting at `min_x`
fn row(min_x: f32, slugs: &[Slug]) -> Vec<CatalogEntry> {
    slugs
        .iter()
        .enumerate()
        .map(|(i, &slug)| {
            let x = min_x + 10.0 * i as f32;
            CatalogEntry::new(slug, vec![format!("M{},0 h10 v10 h-10 z", x)])
        })
        .collect()
}

fn catalogs() -> CatalogSet {
    let male_front = [Slug::ChestLeft, Slug::ChestRight, Slug::AbsUpper, Slug::BicepsLeft];
    let male_back = [Slug::GlutealLeft, Slug::GlutealRight, Slug::HamstringLeft];
    let female_front = [Slug::Hair, Slug::Chest, Slug::Abs];
    let female_back = [Slug::Hair, Slug::Gluteal, Slug::Calves];
    let cat = |min_x: f32, slugs: &[Slug]| {
        let vb = ViewBox::new(min_x, 0.0, 10.0 * slugs.len() as f32, 10.0);
        Catalog::new("fixture", vb, row(min_x, slugs)).unwrap()
    };
    CatalogSet::new(
        cat(0.0, &male_front),
        cat(500.0, &male_back),
        cat(0.0, &female_front),
        cat(500.0, &female_back),
    )
}

fn opts(gender: Gender, side: Side) -> BodyOpts {
    BodyOpts {
        gender,
        side,
        ..BodyOpts::default()
    }
}

// ── Merge scenarios ─────────────────────────────────────────────────────

#[test]
fn two_region_scenario() {
    let cat = Catalog::new(
        "scenario",
        ViewBox::new(0.0, 0.0, 10.0, 10.0),
        vec![
            CatalogEntry::new(Slug::ChestLeft, vec!["M0,0...".to_owned()]),
            CatalogEntry::new(Slug::ChestRight, vec!["M1,1...".to_owned()]),
        ],
    )
    .unwrap();
    let active = [ActiveRegion::with_intensity(Slug::ChestLeft, 2)];
    let palette = Palette::parse(["#aaa", "#bbb"]).unwrap();

    let merged = merge(&cat, &active, &palette, Color::NEUTRAL).unwrap();
    let summary = merged
        .iter()
        .map(|e| (e.slug, e.color.to_string()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (Slug::ChestRight, "#cccccc".to_owned()),
            (Slug::ChestLeft, "#bbbbbb".to_owned()),
        ]
    );
}

#[test]
fn intensity_past_palette_is_a_configuration_error() {
    let set = catalogs();
    let body = Body::new(
        &set,
        BodyOpts {
            colors: Palette::parse(["#aaa", "#bbb"]).unwrap(),
            ..BodyOpts::default()
        },
    )
    .unwrap();
    let err = body
        .render(&[ActiveRegion::with_intensity(Slug::ChestLeft, 5)])
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        Error::IntensityOutOfRange {
            intensity: 5,
            palette_len: 2,
            ..
        }
    ));
}

#[test]
fn orientation_selection() {
    let set = catalogs();
    let female_back = set.select(Gender::Female, Side::Back);
    let slugs = female_back.entries().iter().map(|e| e.slug).collect::<Vec<_>>();
    assert_eq!(slugs, vec![Slug::Hair, Slug::Gluteal, Slug::Calves]);
    assert_ne!(female_back, set.select(Gender::Male, Side::Back));
}

#[test]
fn collapsed_slugs_are_inert_on_detailed_catalogs() {
    let set = catalogs();
    let body = Body::new(&set, opts(Gender::Male, Side::Front)).unwrap();
    let rendered = body
        .render(&[
            ActiveRegion::with_intensity(Slug::Chest, 1),
            ActiveRegion::with_intensity(Slug::BicepsLeft, 1),
        ])
        .unwrap();
    assert_eq!(rendered.len(), 4);
    let highlighted = rendered
        .shapes()
        .filter(|(p, _)| p.fill != Color::NEUTRAL)
        .map(|(p, _)| p.id)
        .collect::<Vec<_>>();
    assert_eq!(highlighted, vec![Slug::BicepsLeft]);
}

// ── Backends ────────────────────────────────────────────────────────────

#[test]
fn markup_end_to_end() {
    let set = catalogs();
    let body = Body::new(
        &set,
        BodyOpts {
            scale: 1.5,
            ..opts(Gender::Female, Side::Front)
        },
    )
    .unwrap();
    let rendered = body
        .render(&[ActiveRegion::with_color(Slug::Abs, "#FF6B6B".parse().unwrap())])
        .unwrap();
    let backend = image::resolve(BackendKind::Markup).unwrap();
    let drawing = rendered.draw(backend.as_ref()).unwrap();
    let svg = drawing.as_markup().unwrap();

    assert_eq!(svg.matches("<path").count(), 3);
    assert!(svg.contains(r#"width="300""#), "{}", svg);
    assert!(svg.contains(r#"height="600""#));
    assert!(svg.contains(r#"viewBox="0 0 30 10""#));
    assert!(svg.contains(r#"id="abs""#));
    assert!(svg.contains("#ff6b6b"));
    assert_eq!(svg.matches("#cccccc").count(), 2);
    // No handler attached, so nothing advertises itself as pressable
    assert!(!svg.contains("cursor"));
}

#[cfg(feature = "native")]
#[test]
fn native_hit_test_dispatches_press() {
    let set = catalogs();
    let body = Body::new(
        &set,
        BodyOpts {
            base_width: 300.0,
            base_height: 100.0,
            ..opts(Gender::Male, Side::Back)
        },
    )
    .unwrap();
    let mut pressed = Vec::new();
    {
        let mut rendered = body
            .render(&[ActiveRegion::with_intensity(Slug::GlutealRight, 1)])
            .unwrap()
            .on_press(|r: &ActiveRegion| pressed.push(r.clone()));
        let backend = image::resolve(BackendKind::Native).unwrap();
        let drawing = rendered.draw(backend.as_ref()).unwrap();
        let raster = drawing.as_raster().unwrap();
        assert_eq!((raster.width(), raster.height()), (300, 100));

        // Each 10x10 square is 100x100 pixels; gluteal-right is the middle one
        assert_eq!(raster.pixel(150, 50), Some(Color::new(0x09, 0x84, 0xe3)));
        assert_eq!(raster.pixel(50, 50), Some(Color::NEUTRAL));
        let idx = raster.hit_test(150, 50).unwrap();
        assert!(rendered.press(idx));
    }
    assert_eq!(pressed, vec![ActiveRegion::with_intensity(Slug::GlutealRight, 1)]);
}

// ── Process-wide state and concurrency ─────────────────────────────────

#[test]
fn installed_catalogs() {
    assert!(matches!(
        Body::from_installed(BodyOpts::default()),
        Err(Error::CatalogNotInstalled)
    ));
    catalog::install(catalogs()).unwrap();
    assert!(matches!(
        catalog::install(catalogs()),
        Err(Error::CatalogAlreadyInstalled)
    ));
    let body = Body::from_installed(opts(Gender::Female, Side::Back)).unwrap();
    assert_eq!(body.render(&[]).unwrap().len(), 3);
}

#[test]
fn concurrent_views_share_one_catalog_set() {
    let set = catalogs();
    let data = vec![
        ActiveRegion::with_intensity(Slug::Hair, 2),
        ActiveRegion::with_intensity(Slug::ChestLeft, 1),
    ];
    let views = [
        (Gender::Male, Side::Front),
        (Gender::Male, Side::Back),
        (Gender::Female, Side::Front),
        (Gender::Female, Side::Back),
    ];
    let counts = thread::scope(|s| {
        let handles = views
            .iter()
            .map(|&(gender, side)| {
                let (set, data) = (&set, &data);
                s.spawn(move || {
                    let body = Body::new(set, opts(gender, side)).unwrap();
                    let rendered = body.render(data).unwrap();
                    let highlighted = rendered
                        .shapes()
                        .filter(|(p, _)| p.fill != Color::NEUTRAL)
                        .count();
                    (rendered.len(), highlighted)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });
    assert_eq!(counts, vec![(4, 1), (3, 0), (3, 1), (3, 1)]);
}

#[test]
fn demo_catalog_parses() {
    let set = CatalogSet::from_json(include_str!("../demos/schematic.json")).unwrap();
    let female_front = set.select(Gender::Female, Side::Front);
    assert!(female_front.contains(Slug::Hair));
    assert_eq!(female_front.view_box(), ViewBox::new(0.0, 0.0, 724.0, 1448.0));

    let data: Vec<ActiveRegion> = serde_json::from_str(include_str!("../demos/data.json")).unwrap();
    let body = Body::new(&set, BodyOpts::default()).unwrap();
    let rendered = body.render(&data).unwrap();
    assert_eq!(rendered.len(), set.select(Gender::Male, Side::Front).len());
}
