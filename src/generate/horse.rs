use std::f64::consts::TAU;

use crate::foundation::core::{Point, Rect};
use crate::foundation::math::{clamp01, resample_polyline};
use crate::foundation::rng::Mulberry32;
use crate::generate::{Stroke, Variant};

/// Inputs of the layered logo generator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorseStrokeParams {
    /// RNG seed.
    pub seed: u32,
    /// Silhouette variant.
    pub variant: Variant,
    /// Number of strokes to emit.
    pub stroke_count: usize,
    /// Points per stroke, at least 2.
    pub points_per_stroke: usize,
    /// Canvas width in logical units.
    pub width: f64,
    /// Canvas height in logical units.
    pub height: f64,
}

/// Seven normalized base polylines: back, belly, neck/head, front leg, back leg, tail, accent.
pub fn base_paths(variant: Variant) -> [Vec<Point>; 7] {
    let (head_lift, neck_bow, back_dip) = match variant {
        Variant::A => (0.0, 0.0, 0.0),
        Variant::B => (0.06, 0.05, 0.0),
        Variant::C => (-0.03, 0.0, 0.05),
    };
    let p = Point::new;
    [
        vec![
            p(0.12, 0.48 - back_dip),
            p(0.28, 0.38 - back_dip),
            p(0.45, 0.35),
            p(0.62, 0.34),
            p(0.76, 0.38),
            p(0.86, 0.45),
        ],
        vec![p(0.18, 0.60), p(0.36, 0.70), p(0.56, 0.70), p(0.74, 0.62)],
        vec![
            p(0.68, 0.40),
            p(0.74, 0.28 - neck_bow),
            p(0.82, 0.20 - head_lift),
            p(0.90, 0.22 - head_lift),
            p(0.84, 0.28 - head_lift),
            p(0.78, 0.34),
        ],
        vec![p(0.66, 0.60), p(0.66, 0.78), p(0.64, 0.92)],
        vec![p(0.36, 0.60), p(0.34, 0.78), p(0.32, 0.92)],
        vec![p(0.14, 0.46), p(0.08, 0.52), p(0.10, 0.62), p(0.16, 0.70)],
        vec![p(0.44, 0.44), p(0.56, 0.46), p(0.66, 0.50)],
    ]
}

/// Padded drawing rectangle for a canvas: margin `max(24, 0.08 * min(w, h))`.
pub fn drawing_rect(width: f64, height: f64) -> Rect {
    let margin = (width.min(height) * 0.08).max(24.0);
    Rect::new(
        margin,
        margin,
        margin + (width - margin * 2.0).max(1.0),
        margin + (height - margin * 2.0).max(1.0),
    )
}

/// Generate the layered horse logo in canvas coordinates.
///
/// Stroke `i` traces base path `i % 7`. The first band of seven is the clean silhouette; every
/// later band is shifted by a seeded offset that grows with the band index and roughened by a
/// per-point jitter that peaks mid-stroke. Each stroke consumes the same number of RNG draws
/// whatever its band.
#[tracing::instrument(skip_all, fields(seed = params.seed, variant = params.variant.as_str(), strokes = params.stroke_count))]
pub fn generate_horse_strokes(params: &HorseStrokeParams) -> Vec<Stroke> {
    let mut rng = Mulberry32::new(params.seed);
    let rect = drawing_rect(params.width, params.height);
    let paths = base_paths(params.variant);
    let pps = params.points_per_stroke.max(2);

    let mut strokes = Vec::with_capacity(params.stroke_count);
    for i in 0..params.stroke_count {
        let sampled = resample_polyline(&paths[i % paths.len()], pps);
        let band = i / paths.len();

        let offset_draw = rng.range(-0.010, 0.010);
        let jitter_draw = rng.range(0.0005, 0.006);
        let angle = rng.range(0.0, TAU);
        let offset_mag = band as f64 * offset_draw;
        let jitter_mag = if band == 0 { 0.0 } else { jitter_draw };
        let (ox, oy) = (angle.cos() * offset_mag, angle.sin() * offset_mag);

        let points = sampled
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let t = idx as f64 / (pps - 1) as f64;
                let wobble = ((t * TAU).sin() * 0.5 + 0.5) * jitter_mag;
                let jx = rng.range(-1.0, 1.0) * wobble;
                let jy = rng.range(-1.0, 1.0) * wobble;
                Point::new(
                    rect.x0 + clamp01(p.x + ox + jx) * rect.width(),
                    rect.y0 + clamp01(p.y + oy + jy) * rect.height(),
                )
            })
            .collect();
        strokes.push(Stroke {
            id: i as u32,
            points,
        });
    }
    strokes
}

#[cfg(test)]
#[path = "../../tests/unit/generate/horse.rs"]
mod tests;
