use super::*;
use crate::render::painter::Painter;

fn surface(w: u32, h: u32) -> SurfaceSize {
    SurfaceSize::new(w, h, 1.0).unwrap()
}

#[test]
fn empty_surface_yields_empty_frame() {
    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let frame = backend.render(surface(0, 10), &[]).unwrap();
    assert!(frame.is_empty());
    assert!(frame.data.is_empty());
}

#[test]
fn clear_color_fills_every_pixel() {
    let mut backend =
        CpuBackend::new(CpuBackendOpts::default().with_clear_rgba(Some([10, 20, 30, 255])))
            .unwrap();
    let frame = backend.render(surface(16, 8), &[]).unwrap();
    assert_eq!(frame.width, 16);
    assert_eq!(frame.height, 8);
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert!(frame.data.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
}

#[test]
fn fill_rect_covers_only_its_area() {
    let mut p = Painter::new(surface(32, 32));
    p.clear(Color::rgb8(0, 0, 0));
    p.fill_rect(Rect::new(0.0, 0.0, 16.0, 32.0), Color::rgb8(255, 0, 0));
    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let frame = backend.render_painter(&p).unwrap();
    assert_eq!(frame.pixel(4, 16), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(28, 16), Some([0, 0, 0, 255]));
}

#[test]
fn dpr_scales_geometry() {
    let mut p = Painter::new(SurfaceSize::new(32, 32, 2.0).unwrap());
    p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::WHITE);
    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let frame = backend.render_painter(&p).unwrap();
    assert_eq!(frame.pixel(12, 12), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(20, 20), Some([0, 0, 0, 0]));
}

#[test]
fn vertical_gradient_runs_top_to_bottom() {
    let mut p = Painter::new(surface(8, 64));
    p.linear_gradient_rect(
        Rect::new(0.0, 0.0, 8.0, 64.0),
        Color::rgb8(0, 0, 0),
        Color::rgb8(0, 0, 255),
    );
    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let frame = backend.render_painter(&p).unwrap();
    let top = frame.pixel(4, 1).unwrap();
    let bottom = frame.pixel(4, 62).unwrap();
    assert!(top[2] < 20);
    assert!(bottom[2] > 235);
    assert_eq!(bottom[3], 255);
}

#[test]
fn radial_glow_is_brightest_at_center() {
    let mut p = Painter::new(surface(64, 64));
    p.radial_glow(
        Point::new(32.0, 32.0),
        24.0,
        Color::WHITE,
        Color::WHITE.with_alpha(0.0),
    );
    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let frame = backend.render_painter(&p).unwrap();
    let center = frame.pixel(32, 32).unwrap()[3];
    let mid = frame.pixel(44, 32).unwrap()[3];
    let outside = frame.pixel(2, 2).unwrap()[3];
    assert!(center > mid, "{center} <= {mid}");
    assert!(mid > outside);
    assert_eq!(outside, 0);
}

#[test]
fn additive_ops_accumulate() {
    let dim = Color::rgba(0.25, 0.0, 0.0, 1.0);
    let mut normal = Painter::new(surface(16, 16));
    normal.clear(Color::rgb8(0, 0, 0));
    normal.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), dim);
    normal.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), dim);

    let mut additive = Painter::new(surface(16, 16));
    additive.clear(Color::rgb8(0, 0, 0));
    additive.set_blend(BlendMode::Additive);
    additive.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), dim);
    additive.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), dim);

    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let a = backend.render_painter(&normal).unwrap().pixel(8, 8).unwrap();
    let b = backend.render_painter(&additive).unwrap().pixel(8, 8).unwrap();
    assert!(b[0] > a[0] + 40, "normal {a:?} additive {b:?}");
}

#[test]
fn text_without_font_is_skipped() {
    let mut p = Painter::new(surface(64, 32));
    p.fill_text(
        "hi",
        Point::new(4.0, 4.0),
        TextAlign::Left,
        16.0,
        Color::WHITE,
        None,
    );
    let mut backend = CpuBackend::new(CpuBackendOpts::default()).unwrap();
    let frame = backend.render_painter(&p).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn invalid_font_bytes_are_rejected() {
    let opts = CpuBackendOpts::default().with_font_bytes(b"not a font".to_vec());
    assert!(CpuBackend::new(opts).is_err());
}

#[test]
fn lerp_rgba8_hits_endpoints() {
    assert_eq!(lerp_rgba8([0, 0, 0, 0], [255, 255, 255, 255], 0.0), [0, 0, 0, 0]);
    assert_eq!(
        lerp_rgba8([0, 0, 0, 0], [255, 255, 255, 255], 1.0),
        [255, 255, 255, 255]
    );
}

#[test]
fn raster_scale_reads_transform_magnitude() {
    assert_eq!(raster_scale(Affine::scale(2.0)), 2.0);
    assert!((raster_scale(Affine::rotate(0.7) * Affine::scale(3.0)) - 3.0).abs() < 1e-9);
    assert_eq!(raster_scale(Affine::scale(0.0)), 1.0);
}

#[test]
fn wide_text_is_squeezed_into_max_width() {
    let centered = TextPlacement {
        origin: Point::new(50.0, 10.0),
        align: TextAlign::Center,
        max_width: Some(100.0),
    };
    let tr = centered.local_transform(200.0);
    assert_eq!(tr * Point::new(0.0, 0.0), Point::new(0.0, 10.0));
    assert_eq!(tr * Point::new(200.0, 4.0), Point::new(100.0, 14.0));

    let left = TextPlacement {
        align: TextAlign::Left,
        ..centered
    };
    let tr = left.local_transform(80.0);
    assert_eq!(tr * Point::new(80.0, 0.0), Point::new(130.0, 10.0));

    let unbounded = TextPlacement {
        max_width: None,
        ..left
    };
    assert_eq!(
        unbounded.local_transform(500.0) * Point::new(500.0, 0.0),
        Point::new(550.0, 10.0)
    );
}
