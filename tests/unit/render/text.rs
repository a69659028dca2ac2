use super::*;
use crate::foundation::core::SurfaceSize;
use crate::render::painter::DrawOp;

/// Every char is exactly 10 units wide at any size.
struct Fixed;

impl TextMeasure for Fixed {
    fn measure(&mut self, text: &str, _size_px: f64) -> f64 {
        text.chars().count() as f64 * 10.0
    }
}

#[test]
fn approx_measure_treats_cjk_as_full_width() {
    let mut m = ApproxMeasure;
    assert_eq!(m.measure("新年", 10.0), 20.0);
    assert!((m.measure("ab", 10.0) - 11.2).abs() < 1e-9);
    assert!((m.measure(" ", 10.0) - 3.0).abs() < 1e-9);
}

#[test]
fn wraps_words_when_line_has_spaces() {
    let lines = wrap_text("aa bb cc", 50.0, 1.0, &mut Fixed);
    assert_eq!(lines, vec!["aa bb".to_owned(), "cc".to_owned()]);
}

#[test]
fn wraps_characters_without_spaces() {
    let lines = wrap_text("新春快乐愿你", 40.0, 1.0, &mut Fixed);
    assert_eq!(lines, vec!["新春快乐".to_owned(), "愿你".to_owned()]);
}

#[test]
fn keeps_hard_breaks_and_blank_lines() {
    let lines = wrap_text("a\n\nb   \n", 100.0, 1.0, &mut Fixed);
    assert_eq!(
        lines,
        vec!["a".to_owned(), String::new(), "b".to_owned(), String::new()]
    );
}

#[test]
fn oversized_token_gets_its_own_line() {
    let lines = wrap_text("a toolongword b", 30.0, 1.0, &mut Fixed);
    assert_eq!(
        lines,
        vec!["a".to_owned(), "toolongword".to_owned(), "b".to_owned()]
    );
}

#[test]
fn center_template_centers_block() {
    let card = CardText {
        text: "ab\ncd",
        template: Template::Center,
        size_px: 50.0,
        color: Color::WHITE,
    };
    let block = layout_card_text(&card, 800.0, 600.0, &mut Fixed);
    assert_eq!(block.align, TextAlign::Center);
    assert_eq!(block.line_height, 64.0);
    assert_eq!(block.max_width, 800.0 - 72.0);
    assert_eq!(block.origin, Point::new(400.0, (600.0 - 128.0) / 2.0));
}

#[test]
fn lower_third_anchors_to_bottom_left() {
    let card = CardText {
        text: "ab",
        template: Template::LowerThird,
        size_px: 10.0,
        color: Color::WHITE,
    };
    let block = layout_card_text(&card, 300.0, 300.0, &mut Fixed);
    assert_eq!(block.align, TextAlign::Left);
    assert_eq!(block.origin, Point::new(24.0, 300.0 - 24.0 - 13.0));
    // narrow surfaces still get a 200 unit wrap budget
    assert_eq!(block.max_width, 252.0);
    let tiny = layout_card_text(&card, 100.0, 100.0, &mut Fixed);
    assert_eq!(tiny.max_width, 200.0);
    assert_eq!(tiny.origin.y, 63.0);
}

#[test]
fn draw_card_text_emits_one_op_per_nonblank_line() {
    let mut p = Painter::new(SurfaceSize::new(400, 400, 1.0).unwrap());
    let card = CardText {
        text: "one\n\ntwo",
        template: Template::Center,
        size_px: 20.0,
        color: Color::WHITE,
    };
    draw_card_text(&mut p, &card, &mut Fixed);
    let texts: Vec<_> = p
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, origin, .. } => Some((text.clone(), origin.y)),
            _ => None,
        })
        .collect();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].0, "one");
    assert_eq!(texts[1].0, "two");
    assert_eq!(texts[1].1 - texts[0].1, 2.0 * 26.0);
}

#[test]
fn template_round_trips_through_json() {
    let t: Template = serde_json::from_str("\"lowerThird\"").unwrap();
    assert_eq!(t, Template::LowerThird);
    assert_eq!(t.toggled(), Template::Center);
    assert_eq!(serde_json::to_string(&Template::Center).unwrap(), "\"center\"");
}

#[test]
fn card_lines_carry_the_wrap_width() {
    let mut p = Painter::new(SurfaceSize::new(400, 400, 1.0).unwrap());
    let card = CardText {
        text: "one\ntwo",
        template: Template::LowerThird,
        size_px: 20.0,
        color: Color::WHITE,
    };
    draw_card_text(&mut p, &card, &mut Fixed);
    let widths: Vec<_> = p
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { max_width, .. } => Some(*max_width),
            _ => None,
        })
        .collect();
    assert_eq!(widths, vec![Some(352.0); 2]);
}
