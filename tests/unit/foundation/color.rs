use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn parses_hex_forms() {
    assert_eq!(Color::parse("#ff0000").unwrap(), Color::rgba(1.0, 0.0, 0.0, 1.0));
    assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);

    let c = Color::parse("#0000ff80").unwrap();
    assert!(close(c.b, 1.0));
    assert!(close(c.a, 128.0 / 255.0));

    let bg = Color::parse("#0b0f1a").unwrap();
    assert_eq!(bg.to_rgba8(), [0x0b, 0x0f, 0x1a, 255]);
}

#[test]
fn parses_css_rgba_strings() {
    let c = Color::parse("rgba(170, 210, 255, 1)").unwrap();
    assert_eq!(c.to_rgba8(), [170, 210, 255, 255]);

    let c = Color::parse("rgb(28 28 32 / 50%)").unwrap();
    assert_eq!(c.to_rgba8()[0], 28);
    assert!(close(c.a, 0.5));
}

#[test]
fn parses_hsl_strings() {
    let c = Color::parse("hsl(0, 100%, 50%)").unwrap();
    assert!(close(c.r, 1.0));
    assert!(close(c.g, 0.0));
    assert!(close(c.b, 0.0));

    let c = Color::parse("hsla(120deg, 100%, 50%, 0.25)").unwrap();
    assert!(close(c.g, 1.0));
    assert!(close(c.a, 0.25));
}

#[test]
fn rejects_garbage() {
    assert!(Color::parse("#12").is_err());
    assert!(Color::parse("#zzzzzz").is_err());
    assert!(Color::parse("rgb(1, 2)").is_err());
    assert!(Color::parse("tomato").is_err());
}

#[test]
fn premul_conversion_clamps() {
    let c = Color::rgba(2.0, 0.5, -1.0, 0.5).to_rgba8_premul();
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.b, 0);
}
