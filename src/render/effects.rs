use std::f64::consts::TAU;

use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::particles::blossom::{BlossomKind, PeachBlossom};
use crate::particles::firework::Burst;
use crate::particles::snow::Snowflake;
use crate::render::painter::{BlendMode, Painter};

const PAPER_SHADE: Color = Color::rgba(120.0 / 255.0, 110.0 / 255.0, 90.0 / 255.0, 0.06);

fn hsl(h: f64, s_pct: f64, l_pct: f64, a: f64) -> Color {
    Color::hsla(h, s_pct / 100.0, l_pct / 100.0, a)
}

/// Closed teardrop of half-height `r` centered on the origin.
pub(crate) fn petal_path(r: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((0.0, -r));
    p.curve_to((r * 0.8, -r * 0.6), (r * 0.9, r * 0.5), (0.0, r));
    p.curve_to((-r * 0.9, r * 0.5), (-r * 0.8, -r * 0.6), (0.0, -r));
    p.close_path();
    p
}

fn fade_after(t: f64, start: f64) -> f64 {
    if t < start {
        1.0
    } else {
        (1.0 - (t - start) / (1.0 - start)).max(0.0)
    }
}

fn draw_blossom(painter: &mut Painter, b: &PeachBlossom) {
    let t = b.life / b.life_max;
    let alpha = (0.09 + 0.14 * b.depth) * b.bloom * fade_after(t, 0.72);

    painter.save();
    painter.translate(b.pos.to_vec2());
    painter.rotate(b.rot);

    let wash_radius = b.r * (6.6 + 2.8 * b.depth);
    painter.radial_glow(
        Point::ZERO,
        wash_radius,
        hsl(
            b.hue,
            b.sat,
            (b.light + 10.0).min(94.0),
            alpha * (0.55 + 0.25 * b.depth),
        ),
        hsl(b.hue, (b.sat - 22.0).max(10.0), b.light.max(66.0), 0.0),
    );

    let petal_color = hsl(b.hue, b.sat, b.light, alpha * (1.0 + 0.55 * b.depth));
    let pr = b.r * (0.95 + 0.55 * b.bloom);
    let petals = b.petals.max(1);
    for i in 0..petals {
        painter.save();
        painter.rotate(f64::from(i) * TAU / f64::from(petals));
        painter.translate((0.0, -b.r * (0.42 + 0.08 * b.depth)));
        painter.fill_path(petal_path(pr), petal_color);
        painter.restore();
    }

    painter.fill_circle(
        Point::ZERO,
        (b.r * (0.45 + 0.18 * b.depth)).max(1.2),
        hsl(
            b.hue + 8.0,
            (b.sat + 18.0).min(72.0),
            (b.light - 32.0 - 10.0 * b.depth).max(32.0),
            alpha * (0.9 + 0.55 * b.depth),
        ),
    );
    painter.restore();
}

fn draw_petal(painter: &mut Painter, b: &PeachBlossom) {
    let t = b.life / b.life_max;
    let alpha = (0.08 + 0.10 * b.depth) * b.bloom * fade_after(t, 0.78);

    painter.save();
    painter.translate(b.pos.to_vec2());
    painter.rotate(b.rot);

    let wash_radius = b.r * (5.2 + 2.0 * b.depth);
    painter.radial_glow(
        Point::ZERO,
        wash_radius,
        hsl(
            b.hue,
            b.sat,
            (b.light + 12.0).min(95.0),
            alpha * (0.55 + 0.18 * b.depth),
        ),
        hsl(b.hue, (b.sat - 22.0).max(10.0), b.light.max(68.0), 0.0),
    );

    let pr = b.r * (1.05 + 0.65 * b.bloom);
    let petal_alpha = alpha * (0.95 + 0.75 * b.depth);
    painter.save();
    painter.translate((0.0, -b.r * (0.20 + 0.16 * b.depth)));
    painter.fill_path(
        petal_path(pr),
        hsl(b.hue, (b.sat - 4.0).max(18.0), b.light, petal_alpha),
    );
    painter.restore();

    let mut vein = BezPath::new();
    vein.move_to((-b.r * 0.2, -b.r * 0.75));
    vein.quad_to((b.r * 0.35, -b.r * 0.1), (-b.r * 0.05, b.r * 0.85));
    painter.stroke_path(
        vein,
        hsl(
            b.hue,
            (b.sat - 14.0).max(10.0),
            (b.light + 14.0).min(96.0),
            petal_alpha * 0.55,
        ),
        (b.r * 0.08).max(1.0),
    );
    painter.restore();
}

/// Watercolor blossoms, then falling petals, then a faint paper vignette.
///
/// Coordinates are logical pixels; the painter is not cleared.
pub fn render_blossoms(painter: &mut Painter, items: &[PeachBlossom]) {
    if painter.is_noop() {
        return;
    }
    for b in items.iter().filter(|b| b.kind == BlossomKind::Blossom) {
        draw_blossom(painter, b);
    }
    for b in items.iter().filter(|b| b.kind == BlossomKind::Petal) {
        draw_petal(painter, b);
    }

    let size = painter.logical_size();
    let m = size.width.min(size.height);
    painter.radial_gradient(
        Rect::from_origin_size(Point::ZERO, size),
        Point::new(size.width * 0.5, size.height * 0.45),
        m * 0.15,
        m * 0.85,
        Color::TRANSPARENT,
        PAPER_SHADE,
    );
}

/// Additive core disc plus a halo that widens as each particle ages.
pub fn render_fireworks(painter: &mut Painter, bursts: &[Burst]) {
    if painter.is_noop() {
        return;
    }
    painter.save();
    painter.set_blend(BlendMode::Additive);
    for p in bursts.iter().flat_map(|b| b.particles.iter()) {
        let t = p.age();
        let alpha = (1.0 - t) * 0.9;
        painter.fill_circle(p.pos, p.size, p.color.with_alpha(alpha));
        painter.fill_circle(
            p.pos,
            p.size * (3.2 + 2.5 * t),
            p.color.with_alpha(alpha * 0.25),
        );
    }
    painter.restore();
}

/// Additive white flakes.
pub fn render_snow(painter: &mut Painter, flakes: &[Snowflake]) {
    if painter.is_noop() {
        return;
    }
    painter.save();
    painter.set_blend(BlendMode::Additive);
    for f in flakes {
        painter.fill_circle(f.pos, f.r, Color::WHITE.with_alpha(f.alpha));
    }
    painter.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/render/effects.rs"]
mod tests;
