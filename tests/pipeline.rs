//! End-to-end pipeline tests over synthetic in-memory fonts.

use std::collections::BTreeSet;

use kadomaru::font_source::{apply_naming, FontNaming, GlyphSnapshot};
use kadomaru::pipeline::{FailurePolicy, FontProcessor, ProcessOptions};

fn line_contour(points: &[(f64, f64)]) -> norad::Contour {
    norad::Contour::new(
        points
            .iter()
            .map(|&(x, y)| {
                norad::ContourPoint::new(x, y, norad::PointType::Line, false, None, None)
            })
            .collect(),
        None,
    )
}

fn glyph_with_contours(
    name: &str,
    codepoint: Option<char>,
    contours: Vec<norad::Contour>,
) -> norad::Glyph {
    let mut glyph = norad::Glyph::new(name);
    if let Some(c) = codepoint {
        glyph.codepoints.insert(c);
    }
    glyph.contours = contours;
    glyph
}

/// Counter-clockwise square with its bottom-left corner at the origin.
fn square(side: f64) -> norad::Contour {
    line_contour(&[(0.0, 0.0), (side, 0.0), (side, side), (0.0, side)])
}

/// Clockwise square counter inset inside a larger square.
fn counter(low: f64, high: f64) -> norad::Contour {
    line_contour(&[(low, low), (low, high), (high, high), (high, low)])
}

fn ideograph_font() -> norad::Font {
    let mut font = norad::Font::new();
    let layer = font.default_layer_mut();
    layer.insert_glyph(glyph_with_contours(
        "uni4E2D",
        Some('中'),
        vec![square(700.0), counter(200.0, 500.0)],
    ));
    layer.insert_glyph(glyph_with_contours(
        "uni4E00",
        Some('一'),
        vec![square(650.0)],
    ));
    layer.insert_glyph(glyph_with_contours("A", Some('A'), vec![square(700.0)]));
    font
}

fn sequential_options() -> ProcessOptions {
    ProcessOptions {
        parallel: false,
        ..ProcessOptions::default()
    }
}

fn glyph_coordinates(font: &norad::Font, name: &str) -> Vec<(f64, f64)> {
    font.default_layer()
        .get_glyph(name)
        .unwrap()
        .contours
        .iter()
        .flat_map(|c| c.points.iter().map(|p| (p.x, p.y)))
        .collect()
}

#[test]
fn parallel_and_sequential_runs_are_identical() {
    let mut sequential = FontProcessor::from_font(ideograph_font());
    sequential.process(&sequential_options()).unwrap();

    let mut parallel = FontProcessor::from_font(ideograph_font());
    let options = ProcessOptions {
        parallel: true,
        workers: Some(2),
        // Small chunks so the work actually spreads across workers
        chunk_size: 1,
        ..ProcessOptions::default()
    };
    parallel.process(&options).unwrap();

    for name in ["uni4E2D", "uni4E00", "A"] {
        assert_eq!(
            glyph_coordinates(sequential.font(), name),
            glyph_coordinates(parallel.font(), name),
            "glyph {name} diverged between execution modes"
        );
    }
}

#[test]
fn winding_direction_survives_the_full_chain() {
    let mut processor = FontProcessor::from_font(ideograph_font());
    let before: Vec<bool> =
        GlyphSnapshot::from_norad_glyph("uni4E2D", processor.font().default_layer().get_glyph("uni4E2D").unwrap())
            .contours
            .iter()
            .map(|c| c.clockwise)
            .collect();

    processor.process(&sequential_options()).unwrap();

    let after_glyph = processor.font().default_layer().get_glyph("uni4E2D").unwrap();
    let after = GlyphSnapshot::from_norad_glyph("uni4E2D", after_glyph);
    let recomputed: Vec<bool> = after.contours.iter().map(|c| c.is_clockwise()).collect();
    assert_eq!(before, vec![false, true]);
    assert_eq!(recomputed, before);
}

#[test]
fn only_selector_targets_are_touched() {
    let mut processor = FontProcessor::from_font(ideograph_font());
    let report = processor.process(&sequential_options()).unwrap();
    assert_eq!(report.targets, 2);
    assert_eq!(report.processed, 2);

    let layer = processor.font().default_layer();
    // Rounded squares carry three points per corner
    assert_eq!(layer.get_glyph("uni4E00").unwrap().contours[0].points.len(), 12);
    // The non-target keeps its original four corners
    assert_eq!(layer.get_glyph("A").unwrap().contours[0].points.len(), 4);
}

#[test]
fn subset_mode_bypasses_the_selector() {
    let mut processor = FontProcessor::from_font(ideograph_font());
    let subset: BTreeSet<String> = ["A".to_string()].into_iter().collect();
    let options = ProcessOptions {
        subset: Some(subset),
        ..sequential_options()
    };
    let report = processor.process(&options).unwrap();
    assert_eq!(report.targets, 1);

    let layer = processor.font().default_layer();
    assert_eq!(layer.get_glyph("A").unwrap().contours[0].points.len(), 12);
    assert_eq!(layer.get_glyph("uni4E2D").unwrap().contours[0].points.len(), 4);
}

#[test]
fn rounded_output_has_integer_coordinates() {
    let mut font = norad::Font::new();
    // Slanted sides so the rounding insets land off the integer grid
    font.default_layer_mut().insert_glyph(glyph_with_contours(
        "uni4E09",
        Some('三'),
        vec![line_contour(&[(0.0, 0.0), (643.0, 0.0), (600.0, 97.0), (40.0, 97.0)])],
    ));
    let mut processor = FontProcessor::from_font(font);
    processor.process(&sequential_options()).unwrap();

    for (x, y) in glyph_coordinates(processor.font(), "uni4E09") {
        assert_eq!(x.fract(), 0.0);
        assert_eq!(y.fract(), 0.0);
    }
}

#[test]
fn clean_geometry_passes_through_unchanged() {
    // A diamond drawn with curve anchors and control points: no
    // horizontal relations, no line corners, no steps
    let contour = norad::Contour::new(
        vec![
            norad::ContourPoint::new(0.0, 0.0, norad::PointType::Curve, true, None, None),
            norad::ContourPoint::new(20.0, -30.0, norad::PointType::OffCurve, false, None, None),
            norad::ContourPoint::new(50.0, -50.0, norad::PointType::Curve, true, None, None),
            norad::ContourPoint::new(80.0, -30.0, norad::PointType::OffCurve, false, None, None),
            norad::ContourPoint::new(100.0, 0.0, norad::PointType::Curve, true, None, None),
            norad::ContourPoint::new(80.0, 30.0, norad::PointType::OffCurve, false, None, None),
            norad::ContourPoint::new(50.0, 50.0, norad::PointType::Curve, true, None, None),
            norad::ContourPoint::new(20.0, 30.0, norad::PointType::OffCurve, false, None, None),
        ],
        None,
    );
    let mut font = norad::Font::new();
    font.default_layer_mut().insert_glyph(glyph_with_contours(
        "uni4E2D",
        Some('中'),
        vec![contour],
    ));
    let mut processor = FontProcessor::from_font(font);
    let before = glyph_coordinates(processor.font(), "uni4E2D");
    processor.process(&sequential_options()).unwrap();

    // The enhancer scan starts its emission three points before the
    // contour's first point, so the closed path may come back rotated;
    // the coordinates themselves are untouched.
    let mut after = glyph_coordinates(processor.font(), "uni4E2D");
    assert_eq!(after.len(), before.len());
    let mut expected = before;
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    after.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(after, expected);
}

#[test]
fn malformed_contours_abort_with_glyph_context() {
    let mut font = ideograph_font();
    // Two control points with no terminating anchor
    font.default_layer_mut().insert_glyph(glyph_with_contours(
        "uni4E8C",
        Some('二'),
        vec![norad::Contour::new(
            vec![
                norad::ContourPoint::new(0.0, 0.0, norad::PointType::OffCurve, false, None, None),
                norad::ContourPoint::new(10.0, 10.0, norad::PointType::OffCurve, false, None, None),
            ],
            None,
        )],
    ));

    let mut processor = FontProcessor::from_font(font);
    let error = processor.process(&sequential_options()).unwrap_err();
    assert!(error.to_string().contains("uni4E8C"));
}

#[test]
fn keep_going_skips_failed_glyphs() {
    let mut font = ideograph_font();
    font.default_layer_mut().insert_glyph(glyph_with_contours(
        "uni4E8C",
        Some('二'),
        vec![norad::Contour::new(
            vec![
                norad::ContourPoint::new(0.0, 0.0, norad::PointType::OffCurve, false, None, None),
                norad::ContourPoint::new(10.0, 10.0, norad::PointType::OffCurve, false, None, None),
            ],
            None,
        )],
    ));

    let mut processor = FontProcessor::from_font(font);
    let options = ProcessOptions {
        failure_policy: FailurePolicy::Continue,
        ..sequential_options()
    };
    let report = processor.process(&options).unwrap();
    assert_eq!(report.targets, 3);
    assert_eq!(report.processed, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].glyph(), "uni4E8C");

    let layer = processor.font().default_layer();
    // The failed glyph is never partially written back
    assert_eq!(layer.get_glyph("uni4E8C").unwrap().contours[0].points.len(), 2);
    // The healthy targets were still processed
    assert_eq!(layer.get_glyph("uni4E00").unwrap().contours[0].points.len(), 12);
}

#[test]
fn save_and_reload_round_trip() {
    let mut processor = FontProcessor::from_font(ideograph_font());
    let naming = FontNaming::default();
    apply_naming(processor.font_mut(), &naming);
    processor.process(&sequential_options()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("styled.ufo");
    processor.save(&path).unwrap();

    let reloaded = norad::Font::load(&path).unwrap();
    assert_eq!(
        reloaded.font_info.family_name.as_deref(),
        Some("Kadomaru JP")
    );
    let glyph = reloaded.default_layer().get_glyph("uni4E00").unwrap();
    assert_eq!(glyph.contours[0].points.len(), 12);
    let snapshot = GlyphSnapshot::from_norad_glyph("uni4E00", glyph);
    assert!(snapshot.contours.iter().all(|c| c.validate().is_ok()));
    assert!(!snapshot.contours[0].is_clockwise());
}
