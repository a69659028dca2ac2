use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect};
use crate::foundation::math::{dist, lerp_point};
use crate::particles::ink::{
    DEFAULT_K, DEFAULT_MAX_DIST, INK_MAX_DIST, InkMode, InkPoint, animated_positions,
    constellation_edges,
};
use crate::render::painter::{BlendMode, Painter};
use crate::render::text::{CardText, TextMeasure, draw_card_text};

const INK_LINE: (u8, u8, u8) = (28, 28, 32);
const INK_DOT: (u8, u8, u8) = (20, 20, 25);

/// Drawing style for a point cloud.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConstellationStyle {
    /// Glowing stars on a night gradient.
    #[default]
    Star,
    /// Dark ink on a transparent page.
    Ink,
}

/// Colors of the star map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPalette {
    /// Gradient top.
    pub bg_top: Color,
    /// Gradient bottom.
    pub bg_bottom: Color,
    /// Edge color.
    pub line: Color,
    /// Star core color.
    pub point: Color,
    /// Star halo and light packet color.
    pub glow: Color,
}

impl Default for StarPalette {
    fn default() -> Self {
        Self {
            bg_top: Color::rgb8(0x05, 0x07, 0x0f),
            bg_bottom: Color::rgb8(0x0b, 0x15, 0x30),
            line: Color::rgb8(170, 210, 255),
            point: Color::WHITE,
            glow: Color::rgb8(120, 190, 255),
        }
    }
}

/// Everything the constellation renderer reads.
#[derive(Clone, Debug)]
pub struct ConstellationView<'a> {
    /// Normalized points.
    pub points: &'a [InkPoint],
    /// Motion mode.
    pub mode: InkMode,
    /// Look.
    pub style: ConstellationStyle,
    /// Star-map colors; ignored by the ink style.
    pub palette: StarPalette,
    /// Optional overlay.
    pub card: Option<CardText<'a>>,
}

/// Star brightness in `[0.1, 1]`.
pub fn twinkle(p: &InkPoint, t: f64) -> f64 {
    0.55 + 0.45 * (t * p.speed + p.phase).sin()
}

/// Where along an edge its light packet sits, in `[0, 1)`.
fn packet_progress(a: &InkPoint, b: &InkPoint, t: f64) -> f64 {
    let offset = (f64::from(a.id) * 0.37 + f64::from(b.id) * 0.61).fract();
    (t * 0.18 + offset).fract()
}

/// Render one frame of a constellation card at `time_ms`.
pub fn render_constellation(
    painter: &mut Painter,
    view: &ConstellationView<'_>,
    time_ms: f64,
    measure: &mut dyn TextMeasure,
) {
    if painter.is_noop() {
        return;
    }
    match view.style {
        ConstellationStyle::Star => draw_star_map(painter, view, time_ms),
        ConstellationStyle::Ink => draw_ink(painter, view, time_ms),
    }
    if let Some(card) = &view.card {
        draw_card_text(painter, card, measure);
    }
}

fn draw_star_map(painter: &mut Painter, view: &ConstellationView<'_>, time_ms: f64) {
    let size = painter.logical_size();
    let (w, h) = (size.width, size.height);
    painter.linear_gradient_rect(
        Rect::from_origin_size(Point::ZERO, size),
        view.palette.bg_top,
        view.palette.bg_bottom,
    );

    let t = time_ms / 1000.0;
    let pts = view.points;
    let pos = animated_positions(pts, t, view.mode);
    let px: Vec<Point> = pos.iter().map(|p| Point::new(p.x * w, p.y * h)).collect();
    let glow = twinkle_all(pts, t);

    let edges = constellation_edges(pts, &pos, DEFAULT_K, DEFAULT_MAX_DIST);
    for &(a, b) in &edges {
        let alpha = 0.18 + 0.32 * (glow[a] + glow[b]) * 0.5;
        painter.stroke_line(px[a], px[b], view.palette.line.mul_alpha(alpha), 1.0);
    }

    painter.save();
    painter.set_blend(BlendMode::Additive);
    for &(a, b) in &edges {
        let u = packet_progress(&pts[a], &pts[b], t);
        let c = lerp_point(px[a], px[b], u);
        let strength = 0.55 * (glow[a] + glow[b]) * 0.5;
        painter.radial_glow(
            c,
            6.0,
            view.palette.glow.mul_alpha(strength),
            view.palette.glow.with_alpha(0.0),
        );
    }
    for (i, p) in pts.iter().enumerate() {
        let tw = glow[i];
        painter.radial_glow(
            px[i],
            (6.0 + 4.0 * p.size) * (0.8 + 0.2 * tw),
            view.palette.glow.mul_alpha(0.35 * tw),
            view.palette.glow.with_alpha(0.0),
        );
    }
    painter.restore();

    for (i, p) in pts.iter().enumerate() {
        let tw = glow[i];
        painter.fill_circle(
            px[i],
            1.2 + 0.6 * p.size,
            view.palette.point.mul_alpha(0.6 + 0.4 * tw),
        );
    }
}

fn twinkle_all(points: &[InkPoint], t: f64) -> Vec<f64> {
    points.iter().map(|p| twinkle(p, t)).collect()
}

fn draw_ink(painter: &mut Painter, view: &ConstellationView<'_>, time_ms: f64) {
    let size = painter.logical_size();
    let (w, h) = (size.width, size.height);
    let t = time_ms / 1000.0;
    let pts = view.points;
    let pos = animated_positions(pts, t, view.mode);
    let px: Vec<Point> = pos.iter().map(|p| Point::new(p.x * w, p.y * h)).collect();

    let breath = 0.85 + (t * 0.4).sin() * 0.03;
    let (lr, lg, lb) = INK_LINE;
    let line = Color::rgb8(lr, lg, lb);
    for (a, b) in constellation_edges(pts, &pos, DEFAULT_K, INK_MAX_DIST) {
        // short links read as heavier strokes
        let width = (3.0 - dist(pts[a].pos, pts[b].pos) * 5.0).max(0.5);
        painter.stroke_line(
            px[a],
            px[b],
            line.with_alpha(breath * pts[a].ink_density),
            width,
        );
        painter.stroke_line(px[a], px[b], line.with_alpha(0.08), width * 2.5);
    }

    let (dr, dg, db) = INK_DOT;
    let dot = Color::rgb8(dr, dg, db);
    for (i, p) in pts.iter().enumerate() {
        painter.fill_circle(px[i], p.size * 2.0, dot.with_alpha(0.9 * p.ink_density));
        painter.fill_circle(px[i], p.size * 4.5, dot.with_alpha(0.05));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/constellation.rs"]
mod tests;
