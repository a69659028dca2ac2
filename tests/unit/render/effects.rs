use super::*;
use crate::foundation::core::{Size, SurfaceSize};
use crate::particles::blossom::create_peach_blossoms;
use crate::particles::firework::spawn_burst;
use crate::particles::snow::create_snowflakes;
use crate::render::painter::DrawOp;

fn painter() -> Painter {
    Painter::new(SurfaceSize::new(400, 300, 1.0).unwrap())
}

#[test]
fn petal_path_is_closed_teardrop() {
    let p = petal_path(10.0);
    let bbox = kurbo::Shape::bounding_box(&p);
    assert!((bbox.min_y() + 10.0).abs() < 1e-9);
    assert!((bbox.max_y() - 10.0).abs() < 1e-9);
    assert!(bbox.width() > 0.0 && bbox.width() < 20.0);
}

#[test]
fn unbloomed_pool_only_draws_vignette() {
    // bloom starts at 0, so every blossom and petal is fully transparent
    let items = create_peach_blossoms(20, Size::new(400.0, 300.0), 7);
    let mut p = painter();
    render_blossoms(&mut p, &items);
    assert!(p.ops().iter().all(|op| matches!(op, DrawOp::RadialGradient { .. })));
    let last = p.ops().last().unwrap();
    let DrawOp::RadialGradient { center, r0, r1, .. } = last else {
        panic!("vignette must be last");
    };
    assert_eq!(*center, Point::new(200.0, 135.0));
    assert!((r0 - 45.0).abs() < 1e-9);
    assert!((r1 - 255.0).abs() < 1e-9);
}

#[test]
fn bloomed_blossom_draws_every_petal() {
    let mut items = create_peach_blossoms(40, Size::new(400.0, 300.0), 3);
    items.retain(|b| b.kind == BlossomKind::Blossom);
    items.truncate(1);
    items[0].bloom = 1.0;
    let petals = usize::from(items[0].petals);

    let mut p = painter();
    render_blossoms(&mut p, &items);
    let fills = p
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::FillPath { .. }))
        .count();
    // petals plus the center dot
    assert_eq!(fills, petals + 1);
}

#[test]
fn fireworks_are_additive_and_restore_blend() {
    let bursts = vec![spawn_burst(Point::new(100.0, 100.0), 1.0, 11)];
    let n = bursts[0].particles.len();
    let mut p = painter();
    render_fireworks(&mut p, &bursts);
    assert_eq!(p.blend(), BlendMode::Normal);
    assert_eq!(p.ops().len(), n * 2);
    assert!(p.ops().iter().all(|op| matches!(
        op,
        DrawOp::FillPath {
            blend: BlendMode::Additive,
            ..
        }
    )));
}

#[test]
fn snow_draws_one_disc_per_flake() {
    let flakes = create_snowflakes(25, Size::new(400.0, 300.0), 5);
    let mut p = painter();
    render_snow(&mut p, &flakes);
    assert_eq!(p.ops().len(), 25);
}
