use super::*;

#[test]
fn endpoints_are_exact() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
}

#[test]
fn input_is_clamped() {
    assert_eq!(ease_in_out_cubic(-3.0), 0.0);
    assert_eq!(ease_in_out_cubic(7.0), 1.0);
}

#[test]
fn symmetric_around_half() {
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    let a = ease_in_out_cubic(0.2);
    let b = ease_in_out_cubic(0.8);
    assert!((a + b - 1.0).abs() < 1e-12);
    assert!((a - 0.032).abs() < 1e-12);
}
