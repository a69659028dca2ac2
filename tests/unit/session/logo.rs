use super::*;
use crate::foundation::core::SurfaceSize;
use crate::foundation::error::QijiError;
use crate::generate::horse::HorseStrokeParams;
use crate::render::painter::DrawOp;
use crate::render::text::ApproxMeasure;

fn canvas() -> Size {
    Size::new(800.0, 600.0)
}

fn session() -> LogoSession {
    LogoSession::new(LogoCardV1::default(), canvas()).unwrap()
}

#[test]
fn new_generates_the_configured_set() {
    let s = session();
    assert_eq!(s.strokes().len(), 28);
    assert!(s.strokes().iter().all(|st| st.points.len() == 48));
    assert!(!s.morph().ready());
}

#[test]
fn invalid_card_is_rejected() {
    let mut card = LogoCardV1::default();
    card.logo.stroke_count = 0;
    assert!(matches!(
        LogoSession::new(card, canvas()),
        Err(QijiError::Validation(_))
    ));
}

#[test]
fn morph_to_next_cycles_variant_and_runs_for_800ms() {
    let mut s = session();
    let before = s.strokes().to_vec();
    assert_eq!(s.morph_to_next(1000.0), Variant::B);
    assert_eq!(s.card().logo.variant, "b");

    let expected = generate_horse_strokes(&HorseStrokeParams {
        variant: Variant::B,
        ..s.card().horse_params(800.0, 600.0)
    });
    assert_eq!(s.strokes(), expected.as_slice());
    assert_eq!(s.morph().from(), &before);
    assert!(s.morph().ready());

    let mid = s.tick(1400.0);
    assert!(mid > 0.0 && mid < 1.0, "mid = {mid}");
    assert_eq!(s.tick(1800.0), 1.0);
    assert!(!s.morph().controller().is_running());

    assert_eq!(s.morph_to_next(2000.0), Variant::C);
    assert_eq!(s.morph_to_next(2100.0), Variant::A);
}

#[test]
fn empty_canvas_has_no_strokes_and_ignores_morph() {
    let mut s = LogoSession::new(LogoCardV1::default(), Size::ZERO).unwrap();
    assert!(s.strokes().is_empty());
    assert_eq!(s.morph_to_next(0.0), Variant::A);
    assert_eq!(s.card().logo.variant, "a");
}

#[test]
fn reseed_and_resize_regenerate() {
    let mut s = session();
    let before = s.strokes().to_vec();
    s.reseed();
    assert_eq!(s.card().logo.seed, LogoCardV1::default().logo.seed + 1);
    assert_ne!(s.strokes(), before.as_slice());

    s.resize(Size::new(400.0, 300.0));
    assert_eq!(s.size(), Size::new(400.0, 300.0));
    assert_eq!(s.strokes().len(), 28);
}

#[test]
fn render_records_background_strokes_and_text() {
    let mut s = session();
    let mut painter = Painter::new(SurfaceSize::new(800, 600, 1.0).unwrap());
    s.render(&mut painter, 0.0, &mut ApproxMeasure).unwrap();
    let ops = painter.ops();
    assert!(matches!(ops[0], DrawOp::FillPath { .. }));
    let strokes = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
        .count();
    assert_eq!(strokes, 28);
    assert!(ops.iter().any(|op| matches!(op, DrawOp::Text { .. })));

    // Mid-morph frames blend between two sets but draw the same number of strokes.
    s.morph_to_next(0.0);
    s.tick(400.0);
    let mut painter = Painter::new(SurfaceSize::new(800, 600, 1.0).unwrap());
    s.render(&mut painter, 400.0, &mut ApproxMeasure).unwrap();
    let strokes = painter
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::StrokePath { .. }))
        .count();
    assert_eq!(strokes, 28);
}
