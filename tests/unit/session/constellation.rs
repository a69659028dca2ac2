use super::*;
use crate::foundation::core::SurfaceSize;
use crate::render::painter::DrawOp;
use crate::render::text::{ApproxMeasure, Template};

fn session() -> ConstellationSession {
    ConstellationSession::new(ConstellationCardV2::default(), 7).unwrap()
}

#[test]
fn add_point_draws_phase_and_speed_in_range() {
    let mut s = session();
    s.add_point(Point::new(0.25, 1.5));
    let p = s.card().points[0];
    assert_eq!((p.x, p.y), (0.25, 1.0));
    assert!((0.0..TAU).contains(&p.phase));
    assert!((1.0..2.4).contains(&p.speed));
}

#[test]
fn guide_advances_with_point_count() {
    let mut s = session();
    let mut steps = Vec::new();
    for i in 0..7 {
        s.add_point(Point::new(0.1 * f64::from(i), 0.5));
        steps.push(s.guide_step());
    }
    assert_eq!(steps, vec![1, 1, 2, 2, 3, 4, 4]);
}

#[test]
fn undo_recomputes_the_guide() {
    let mut s = session();
    for i in 0..6 {
        s.add_point(Point::new(0.1 * f64::from(i), 0.5));
    }
    assert_eq!(s.guide_step(), GUIDE_DONE);
    let mut steps = Vec::new();
    while s.undo() {
        steps.push(s.guide_step());
    }
    assert_eq!(steps, vec![3, 2, 2, 1, 1, 0]);
    assert!(!s.undo());
}

#[test]
fn clear_and_template_toggle() {
    let mut s = session();
    s.add_point(Point::new(0.5, 0.5));
    s.clear();
    assert!(s.card().points.is_empty());
    assert_eq!(s.guide_step(), 0);

    s.toggle_template();
    assert_eq!(s.card().template, Template::LowerThird);
    s.toggle_template();
    assert_eq!(s.card().template, Template::Center);
}

#[test]
fn palettes_cycle_and_reset_line_colors() {
    let mut s = session();
    s.cycle_palette();
    assert_eq!(s.card().bg.a, "#07050f");
    assert_eq!(s.card().glow_color, "rgba(255,140,220,1)");
    s.cycle_palette();
    assert_eq!(s.card().bg.b, "#052a22");
    s.cycle_palette();
    assert_eq!(s.card().bg.a, "#05070f");
    assert_eq!(
        s.card().line_color,
        ConstellationCardV2::default().line_color
    );
    assert!(s.card().validate().is_ok());
}

#[test]
fn render_draws_gradient_edges_and_text() {
    let mut s = session();
    for (x, y) in [(0.2, 0.2), (0.3, 0.25), (0.4, 0.3)] {
        s.add_point(Point::new(x, y));
    }
    let mut painter = Painter::new(SurfaceSize::new(400, 300, 1.0).unwrap());
    s.render(&mut painter, 500.0, &mut ApproxMeasure).unwrap();
    let ops = painter.ops();
    assert!(matches!(ops[0], DrawOp::LinearGradient { .. }));
    assert!(ops.iter().any(|op| matches!(op, DrawOp::StrokePath { .. })));
    assert!(ops.iter().any(|op| matches!(op, DrawOp::Text { .. })));
}

#[test]
fn guide_prompts_name_head_legs_then_tail() {
    let mut s = session();
    let mut prompts = vec![s.guide_prompt()];
    for i in 0..6 {
        s.add_point(Point::new(0.1 * f64::from(i), 0.5));
        prompts.push(s.guide_prompt());
    }
    assert!(prompts[0].contains("head"));
    assert!(prompts[1].contains("front legs"));
    assert!(prompts[3].contains("back legs"));
    assert!(prompts[5].contains("tail"));
    assert!(prompts[6].starts_with("Done"));
}
