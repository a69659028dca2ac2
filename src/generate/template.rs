use std::f64::consts::TAU;

use crate::foundation::core::Point;
use crate::foundation::math::{clamp01, resample_polyline, sample_cubic};
use crate::foundation::rng::Mulberry32;
use crate::generate::Stroke;
use crate::particles::ink::{InkPoint, StrokeRef};

/// Default seed of the constellation horse.
pub const DEFAULT_TEMPLATE_SEED: u32 = 2026;

/// Twelve anatomical strokes of the constellation horse in normalized space.
///
/// Order: spine, back-to-rump, belly, chest, head, ear, tail, two front legs, two back legs,
/// ribs.
pub fn horse_template_strokes() -> Vec<Stroke> {
    let p = Point::new;
    let spine = sample_cubic(p(0.78, 0.28), p(0.74, 0.20), p(0.62, 0.24), p(0.44, 0.32), 12);
    let back_to_rump = sample_cubic(p(0.44, 0.32), p(0.36, 0.31), p(0.28, 0.34), p(0.22, 0.40), 10);
    let belly = sample_cubic(p(0.62, 0.50), p(0.55, 0.56), p(0.40, 0.58), p(0.28, 0.54), 9);
    let chest = resample_polyline(&[p(0.62, 0.50), p(0.66, 0.42), p(0.68, 0.34)], 6);
    let head = sample_cubic(p(0.78, 0.28), p(0.83, 0.26), p(0.83, 0.32), p(0.77, 0.34), 6);
    let ear = resample_polyline(&[p(0.73, 0.19), p(0.75, 0.14), p(0.77, 0.20)], 3);
    let tail = sample_cubic(p(0.22, 0.40), p(0.16, 0.42), p(0.14, 0.52), p(0.18, 0.62), 8);
    let front_leg = resample_polyline(&[p(0.58, 0.52), p(0.60, 0.66), p(0.58, 0.80)], 6);
    let front_leg2 = resample_polyline(&[p(0.54, 0.52), p(0.53, 0.68), p(0.52, 0.82)], 5);
    let back_leg = resample_polyline(&[p(0.32, 0.54), p(0.30, 0.66), p(0.28, 0.78)], 6);
    let back_leg2 = resample_polyline(&[p(0.36, 0.54), p(0.38, 0.68), p(0.37, 0.80)], 5);
    let ribs = resample_polyline(&[p(0.54, 0.38), p(0.50, 0.44), p(0.46, 0.50)], 4);

    [
        spine,
        back_to_rump,
        belly,
        chest,
        head,
        ear,
        tail,
        front_leg,
        front_leg2,
        back_leg,
        back_leg2,
        ribs,
    ]
    .into_iter()
    .enumerate()
    .map(|(id, points)| Stroke {
        id: id as u32,
        points,
    })
    .collect()
}

/// Turn normalized strokes into a point cloud.
///
/// Ids follow generation order. Each point is jittered by at most `0.0025` per axis and draws
/// density, phase, speed and size from the RNG in that order. Head points read darker, tail
/// points lighter, hooves slightly lighter.
#[tracing::instrument(skip(strokes), fields(strokes = strokes.len()))]
pub fn points_from_strokes(strokes: &[Stroke], seed: u32) -> Vec<InkPoint> {
    let mut rng = Mulberry32::new(seed);
    let mut out = Vec::with_capacity(strokes.iter().map(|s| s.points.len()).sum());
    let mut id = 0u32;
    for stroke in strokes {
        for (order, p) in stroke.points.iter().enumerate() {
            let jx = (rng.next_f64() - 0.5) * 0.005;
            let jy = (rng.next_f64() - 0.5) * 0.005;

            let head_boost = if p.x > 0.68 && p.y < 0.36 { 1.0 } else { 0.92 };
            let tail_light = if p.x < 0.24 { 0.75 } else { 1.0 };
            let leg_boost = if p.y > 0.62 { 0.95 } else { 1.0 };
            let ink_density =
                clamp01((0.65 + rng.next_f64() * 0.35) * head_boost * tail_light * leg_boost);

            let phase = rng.next_f64() * TAU;
            let speed = 0.6 + rng.next_f64() * 1.2;
            let size = 0.85 + rng.next_f64() * 0.85;

            out.push(InkPoint {
                pos: Point::new(clamp01(p.x + jx), clamp01(p.y + jy)),
                phase,
                speed,
                size,
                ink_density,
                id,
                stroke: Some(StrokeRef {
                    stroke_id: stroke.id,
                    order: order as u32,
                }),
            });
            id += 1;
        }
    }
    out
}

/// The constellation horse as a point cloud.
pub fn horse_template_points(seed: u32) -> Vec<InkPoint> {
    points_from_strokes(&horse_template_strokes(), seed)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/template.rs"]
mod tests;
