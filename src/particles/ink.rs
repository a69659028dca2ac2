use std::collections::{BTreeMap, HashSet};
use std::f64::consts::TAU;

use crate::animation::morph::Morphable;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::{clamp01, dist2, lerp, lerp_point};
use crate::foundation::rng::Mulberry32;

/// Default neighbor count for proximity edges.
pub const DEFAULT_K: usize = 2;
/// Default proximity radius in normalized units.
pub const DEFAULT_MAX_DIST: f64 = 0.35;
/// Proximity radius used by the ink renderer.
pub const INK_MAX_DIST: f64 = 0.22;

/// Membership of a point in a generated stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeRef {
    /// Stroke the point belongs to.
    pub stroke_id: u32,
    /// Position within that stroke.
    pub order: u32,
}

/// A star/ink point in normalized `[0, 1]` space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InkPoint {
    /// Resting position.
    pub pos: Point,
    /// Phase offset in radians.
    pub phase: f64,
    /// Twinkle/motion rate multiplier.
    pub speed: f64,
    /// Dot size multiplier.
    pub size: f64,
    /// Ink darkness in `[0, 1]`.
    pub ink_density: f64,
    /// Stable id, assigned once.
    pub id: u32,
    /// Stroke membership, when generated from a stroke set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeRef>,
}

impl InkPoint {
    /// A free-standing point with neutral size and full density.
    pub fn free(id: u32, pos: Point, phase: f64, speed: f64) -> Self {
        Self {
            pos,
            phase,
            speed,
            size: 1.0,
            ink_density: 1.0,
            id,
            stroke: None,
        }
    }
}

/// Motion mode of an ink scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkMode {
    /// Barely breathing.
    #[default]
    Idle,
    /// Slow drift.
    Wandering,
    /// Points held still while the scene disperses.
    Dispersing,
    /// Frozen.
    Finished,
}

/// Two-band sinusoidal noise in `[-1, 1]`.
pub fn noise(t: f64, seed: f64) -> f64 {
    (t + seed * 12.34).sin() * 0.5 + (t * 0.5 + seed * 45.67).sin() * 0.5
}

/// Deterministic displacement of `p` at time `t` seconds.
pub fn point_offset(p: &InkPoint, t: f64, mode: InkMode) -> Vec2 {
    let amp = match mode {
        InkMode::Wandering => 0.020,
        InkMode::Idle => 0.003,
        InkMode::Dispersing | InkMode::Finished => return Vec2::ZERO,
    };
    let rate = if mode == InkMode::Wandering { 0.28 } else { 0.12 };
    let seed = f64::from(p.id);
    Vec2::new(
        noise(t * rate, seed + p.phase) * amp,
        noise(t * rate * 0.86, seed + p.speed) * amp,
    )
}

/// Animated positions of every point, index-aligned with `points`.
pub fn animated_positions(points: &[InkPoint], t: f64, mode: InkMode) -> Vec<Point> {
    points
        .iter()
        .map(|p| p.pos + point_offset(p, t, mode))
        .collect()
}

/// Undirected edge as a canonical `(min, max)` pair of indices.
pub type Edge = (usize, usize);

fn canonical(a: usize, b: usize) -> Edge {
    if a < b { (a, b) } else { (b, a) }
}

/// Remove duplicate edges, keeping first occurrences in order.
pub fn dedupe_edges(edges: impl IntoIterator<Item = Edge>) -> Vec<Edge> {
    let mut seen = HashSet::new();
    edges
        .into_iter()
        .filter(|&(a, b)| a != b)
        .map(|(a, b)| canonical(a, b))
        .filter(|e| seen.insert(*e))
        .collect()
}

/// Edges joining consecutive members of each stroke, by stroke order.
pub fn build_stroke_edges(points: &[InkPoint]) -> Vec<Edge> {
    let mut by_stroke: BTreeMap<u32, Vec<(u32, usize)>> = BTreeMap::new();
    for (i, p) in points.iter().enumerate() {
        if let Some(s) = p.stroke {
            by_stroke.entry(s.stroke_id).or_default().push((s.order, i));
        }
    }

    let mut edges = Vec::new();
    for members in by_stroke.values_mut() {
        members.sort_by_key(|&(order, _)| order);
        for w in members.windows(2) {
            edges.push((w[0].1, w[1].1));
        }
    }
    dedupe_edges(edges)
}

/// Up to `k` nearest neighbors within `max_dist` per point.
///
/// Quadratic in the point count. Ties keep index order.
pub fn build_knn_edges(pos: &[Point], k: usize, max_dist: f64) -> Vec<Edge> {
    let max_d2 = max_dist * max_dist;
    let mut edges = Vec::new();
    let mut candidates: Vec<(usize, f64)> = Vec::new();
    for (i, &pi) in pos.iter().enumerate() {
        candidates.clear();
        candidates.extend(
            pos.iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, &pj)| (j, dist2(pi, pj)))
                .filter(|&(_, d2)| d2 <= max_d2),
        );
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        edges.extend(candidates.iter().take(k).map(|&(j, _)| canonical(i, j)));
    }
    dedupe_edges(edges)
}

/// Stroke edges followed by proximity edges, deduplicated.
pub fn constellation_edges(
    points: &[InkPoint],
    pos: &[Point],
    k: usize,
    max_dist: f64,
) -> Vec<Edge> {
    let stroke = build_stroke_edges(points);
    let knn = build_knn_edges(pos, k, max_dist);
    dedupe_edges(stroke.into_iter().chain(knn))
}

/// User-editable point set with stable ids and undo.
#[derive(Clone, Debug)]
pub struct InkCanvas {
    points: Vec<InkPoint>,
    rng: Mulberry32,
    next_id: u32,
}

impl InkCanvas {
    /// Empty canvas whose new points draw their attributes from `seed`.
    pub fn new(seed: u32) -> Self {
        Self::from_points(Vec::new(), seed)
    }

    /// Canvas seeded with existing points; new ids continue after the largest one.
    pub fn from_points(points: Vec<InkPoint>, seed: u32) -> Self {
        let next_id = points.iter().map(|p| p.id + 1).max().unwrap_or(0);
        Self {
            points,
            rng: Mulberry32::new(seed),
            next_id,
        }
    }

    /// Current points.
    pub fn points(&self) -> &[InkPoint] {
        &self.points
    }

    /// Add a point at normalized `pos` (clamped into the unit square). Returns its id.
    pub fn add_point(&mut self, pos: Point) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let phase = self.rng.range(0.0, TAU);
        let speed = self.rng.range(1.0, 2.4);
        let size = self.rng.range(0.85, 1.7);
        let ink_density = self.rng.range(0.65, 1.0);
        self.points.push(InkPoint {
            pos: Point::new(clamp01(pos.x), clamp01(pos.y)),
            phase,
            speed,
            size,
            ink_density,
            id,
            stroke: None,
        });
        id
    }

    /// Remove the most recently added point.
    pub fn undo(&mut self) -> Option<InkPoint> {
        self.points.pop()
    }

    /// Remove every point. Ids keep increasing.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Morphable for Vec<InkPoint> {
    fn same_topology(&self, other: &Self) -> bool {
        self.len() == other.len()
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }

    fn lerp_to(&self, other: &Self, t: f64) -> Self {
        self.iter()
            .zip(other)
            .map(|(a, b)| InkPoint {
                pos: lerp_point(a.pos, b.pos, t),
                size: lerp(a.size, b.size, t),
                ink_density: lerp(a.ink_density, b.ink_density, t),
                ..a.clone()
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/ink.rs"]
mod tests;
