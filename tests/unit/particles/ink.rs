use super::*;

fn stroke_point(id: u32, x: f64, y: f64, stroke_id: u32, order: u32) -> InkPoint {
    InkPoint {
        stroke: Some(StrokeRef { stroke_id, order }),
        ..InkPoint::free(id, Point::new(x, y), 0.3, 1.1)
    }
}

fn assert_canonical_unique(edges: &[Edge]) {
    let mut seen = HashSet::new();
    for &(a, b) in edges {
        assert!(a < b, "edge ({a}, {b}) not canonical");
        assert!(seen.insert((a, b)), "duplicate edge ({a}, {b})");
    }
}

#[test]
fn finished_mode_suppresses_motion() {
    let p = InkPoint::free(4, Point::new(0.5, 0.5), 1.0, 2.0);
    assert_eq!(point_offset(&p, 12.5, InkMode::Finished), Vec2::ZERO);
    let idle = point_offset(&p, 12.5, InkMode::Idle);
    let wander = point_offset(&p, 12.5, InkMode::Wandering);
    assert!(idle.x.abs() <= 0.003 && idle.y.abs() <= 0.003);
    assert!(wander.x.abs() <= 0.020 && wander.y.abs() <= 0.020);
}

#[test]
fn offsets_are_deterministic() {
    let pts = vec![
        InkPoint::free(0, Point::new(0.1, 0.1), 0.5, 1.5),
        InkPoint::free(1, Point::new(0.9, 0.9), 2.5, 2.0),
    ];
    let a = animated_positions(&pts, 3.25, InkMode::Wandering);
    let b = animated_positions(&pts, 3.25, InkMode::Wandering);
    assert_eq!(a, b);
}

#[test]
fn stroke_edges_follow_order_not_storage() {
    let pts = vec![
        stroke_point(0, 0.0, 0.0, 7, 2),
        stroke_point(1, 0.1, 0.0, 7, 0),
        stroke_point(2, 0.2, 0.0, 7, 1),
        stroke_point(3, 0.9, 0.9, 8, 0),
        InkPoint::free(4, Point::new(0.5, 0.5), 0.0, 1.0),
    ];
    let edges = build_stroke_edges(&pts);
    // order 0 -> 1 -> 2 is index 1 -> 2 -> 0
    assert_eq!(edges, vec![(1, 2), (0, 2)]);
}

#[test]
fn knn_respects_k_and_radius() {
    let pos = vec![
        Point::new(0.0, 0.0),
        Point::new(0.1, 0.0),
        Point::new(0.2, 0.0),
        Point::new(0.9, 0.9),
    ];
    let edges = build_knn_edges(&pos, 1, 0.15);
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
    assert!(edges.iter().all(|&(a, b)| a != 3 && b != 3));
    assert_canonical_unique(&edges);

    assert!(build_knn_edges(&pos, 0, 1.0).is_empty());
    assert!(build_knn_edges(&pos[..1], 2, 1.0).is_empty());
}

#[test]
fn knn_ties_keep_index_order() {
    let pos = vec![
        Point::new(0.5, 0.5),
        Point::new(0.6, 0.5),
        Point::new(0.4, 0.5),
    ];
    let edges = build_knn_edges(&pos, 1, 1.0);
    // point 0 sees 1 and 2 at equal distance and keeps the lower index
    assert_eq!(edges[0], (0, 1));
}

#[test]
fn combined_edges_are_canonical_and_unique() {
    let mut canvas = InkCanvas::new(11);
    for i in 0..30 {
        let f = i as f64 / 30.0;
        canvas.add_point(Point::new(f, (f * 7.0).sin() * 0.5 + 0.5));
    }
    let mut pts = canvas.points().to_vec();
    for (i, p) in pts.iter_mut().enumerate() {
        p.stroke = Some(StrokeRef {
            stroke_id: (i / 5) as u32,
            order: (i % 5) as u32,
        });
    }
    let pos = animated_positions(&pts, 1.0, InkMode::Idle);
    let edges = constellation_edges(&pts, &pos, DEFAULT_K, INK_MAX_DIST);
    assert!(!edges.is_empty());
    assert_canonical_unique(&edges);
}

#[test]
fn dedupe_canonicalizes_and_drops_self_loops() {
    let out = dedupe_edges([(3, 1), (1, 3), (2, 2), (0, 4)]);
    assert_eq!(out, vec![(1, 3), (0, 4)]);
}

#[test]
fn canvas_ids_are_stable_across_undo() {
    let mut c = InkCanvas::new(3);
    let a = c.add_point(Point::new(0.2, 0.2));
    let b = c.add_point(Point::new(1.5, -0.5));
    assert_eq!((a, b), (0, 1));
    assert_eq!(c.points()[1].pos, Point::new(1.0, 0.0));
    let removed = c.undo().unwrap();
    assert_eq!(removed.id, 1);
    let d = c.add_point(Point::new(0.4, 0.4));
    assert_eq!(d, 2);
    c.clear();
    assert!(c.points().is_empty());
    assert!(c.undo().is_none());
}

#[test]
fn user_point_attributes_in_range() {
    let mut c = InkCanvas::new(99);
    for _ in 0..50 {
        c.add_point(Point::new(0.5, 0.5));
    }
    for p in c.points() {
        assert!((0.0..TAU).contains(&p.phase));
        assert!((1.0..2.4).contains(&p.speed));
        assert!((0.0..=1.0).contains(&p.ink_density));
    }
}
