//! Seeded stroke and point-cloud generators.
//!
//! Generators are pure: the same parameters always produce the same output, and every call
//! returns a fresh value instead of mutating a previous set.

pub(crate) mod horse;
pub(crate) mod template;

use crate::animation::morph::Morphable;
use crate::foundation::core::Point;
use crate::foundation::math::lerp_point;

/// One ordered polyline in a generated set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Position of the stroke in its set.
    pub id: u32,
    /// Ordered vertices.
    pub points: Vec<Point>,
}

/// Silhouette variant selector for the logo generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Neutral pose.
    #[default]
    A,
    /// Head lifted, neck bowed.
    B,
    /// Back dipped, head lowered.
    C,
}

impl Variant {
    /// Parse a variant tag. Unknown tags fall back to [`Variant::A`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim() {
            "b" | "B" => Self::B,
            "c" | "C" => Self::C,
            _ => Self::A,
        }
    }

    /// Tag used in scene payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }

    /// Next variant in the `a -> b -> c -> a` cycle.
    pub fn next(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::C,
            Self::C => Self::A,
        }
    }
}

impl Morphable for Vec<Stroke> {
    fn same_topology(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.points.len() == b.points.len())
    }

    fn is_blank(&self) -> bool {
        self.is_empty()
    }

    fn lerp_to(&self, other: &Self, t: f64) -> Self {
        self.iter()
            .zip(other)
            .map(|(a, b)| Stroke {
                id: a.id,
                points: a
                    .points
                    .iter()
                    .zip(&b.points)
                    .map(|(&p, &q)| lerp_point(p, q, t))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/mod.rs"]
mod tests;
