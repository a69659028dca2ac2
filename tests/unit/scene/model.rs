use super::*;
use crate::generate::template::DEFAULT_TEMPLATE_SEED;
use crate::particles::ink::build_stroke_edges;

#[test]
fn logo_defaults_match_stock_card() {
    let card = LogoCardV1::default();
    assert_eq!(card.canvas.background, "#0b0f1a");
    assert_eq!(card.logo.seed, 20260128);
    assert_eq!(card.logo.variant, "a");
    assert_eq!((card.logo.stroke_count, card.logo.points_per_stroke), (28, 48));
    assert_eq!(card.card.template_id, Template::Center);
    assert_eq!(card.card.font_size, 56.0);
    card.validate().unwrap();
}

#[test]
fn constellation_defaults_validate() {
    let card = ConstellationCardV2::default();
    assert!(card.points.is_empty());
    assert_eq!(card.text.weight, 600);
    card.validate().unwrap();
    let palette = card.palette().unwrap();
    assert_eq!(palette.glow.to_rgba8(), [120, 190, 255, 255]);
}

#[test]
fn version_is_read_before_anything_else() {
    for payload in [
        r#"{"version": 3, "points": "garbage"}"#,
        r#"{"version": "1"}"#,
        r#"{"version": 1.5}"#,
        r##"{"canvas": {"background": "#000"}}"##,
        r#"[1, 2, 3]"#,
    ] {
        let err = SharedScene::from_json_str(payload).unwrap_err();
        assert!(matches!(err, QijiError::Incompatible(_)), "{payload}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        SharedScene::from_json_str("{not json"),
        Err(QijiError::Serde(_))
    ));
}

#[test]
fn v2_without_points_array_is_incompatible() {
    let err = SharedScene::from_json_str(r#"{"version": 2}"#).unwrap_err();
    assert!(matches!(err, QijiError::Incompatible(_)));
}

#[test]
fn partial_logo_payload_fills_defaults() {
    let scene =
        SharedScene::from_json_str(r#"{"version": 1, "logo": {"seed": 7, "variant": "b"}}"#)
            .unwrap();
    let SharedScene::Logo(card) = scene else {
        panic!("expected logo card");
    };
    assert_eq!(card.logo.seed, 7);
    assert_eq!(card.logo.stroke_count, 28);
    assert_eq!(card.horse_params(800.0, 600.0).variant, Variant::B);
}

#[test]
fn out_of_range_counts_fail_validation() {
    let err = SharedScene::from_json_str(r#"{"version": 1, "logo": {"strokeCount": 0}}"#)
        .unwrap_err();
    assert!(matches!(err, QijiError::Validation(_)));
    let err =
        SharedScene::from_json_str(r#"{"version": 1, "logo": {"pointsPerStroke": 1}}"#)
            .unwrap_err();
    assert!(matches!(err, QijiError::Validation(_)));
    let err =
        SharedScene::from_json_str(r##"{"version": 1, "canvas": {"background": "#zz"}}"##)
            .unwrap_err();
    assert!(matches!(err, QijiError::Validation(_)));
}

#[test]
fn seeds_wrap_to_32_bits() {
    let mut card = LogoCardV1::default();
    card.logo.seed = -1;
    assert_eq!(card.seed_u32(), u32::MAX);
    card.logo.seed = (1_i64 << 32) + 5;
    assert_eq!(card.seed_u32(), 5);
}

#[test]
fn json_round_trip_keeps_version_tag() {
    let mut card = ConstellationCardV2::default();
    card.points.push(StarPoint::free(0.25, 0.5, 1.0, 2.0));
    let scene = SharedScene::Constellation(card);
    let text = scene.to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["version"], 2);
    assert_eq!(value["lineColor"], "rgba(170, 210, 255, 1)");
    assert_eq!(SharedScene::from_json_str(&text).unwrap(), scene);
}

#[test]
fn fallback_is_used_for_unknown_versions() {
    let fallback = SharedScene::Logo(LogoCardV1::default());
    let scene = SharedScene::from_json_or_default(r#"{"version": 9}"#, fallback.clone());
    assert_eq!(scene, fallback);
}

#[test]
fn ink_points_follow_placement_order() {
    let mut card = ConstellationCardV2::default();
    for i in 0..3 {
        card.points.push(StarPoint::free(0.1 * f64::from(i), 0.2, 0.0, 1.0));
    }
    let pts = card.ink_points();
    assert_eq!(pts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(pts[2].pos, Point::new(0.2, 0.2));
}

#[test]
fn template_stroke_membership_survives_json() {
    let card = ConstellationCardV2::from_template(DEFAULT_TEMPLATE_SEED);
    assert!(card.points.iter().all(|p| p.stroke_id.is_some()));

    let text = SharedScene::Constellation(card.clone()).to_json_string().unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value["points"][0]["strokeId"].is_u64());
    assert!(value["points"][0]["strokeOrder"].is_u64());

    let SharedScene::Constellation(loaded) = SharedScene::from_json_str(&text).unwrap() else {
        panic!("expected constellation");
    };
    assert_eq!(loaded, card);
    let edges = build_stroke_edges(&loaded.ink_points());
    assert!(!edges.is_empty());
}

#[test]
fn hand_placed_stars_have_no_stroke() {
    let raw = r#"{"version": 2, "points": [{"x": 0.5, "y": 0.5, "phase": 0.0, "speed": 1.0}]}"#;
    let SharedScene::Constellation(card) = SharedScene::from_json_str(raw).unwrap() else {
        panic!("expected constellation");
    };
    assert_eq!(card.points[0], StarPoint::free(0.5, 0.5, 0.0, 1.0));
    assert_eq!(card.ink_points()[0].stroke, None);

    let text = SharedScene::Constellation(card).to_json_string().unwrap();
    assert!(!text.contains("strokeId"));
}
