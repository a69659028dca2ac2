use std::f64::consts::TAU;

use crate::foundation::color::Color;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::rng::Mulberry32;

const GRAVITY: f64 = 130.0;
const DAMPING_PER_FRAME: f64 = 0.985;

/// Burst palette: gold, red, orange, blue, violet, pink.
pub const PALETTE: [[u8; 3]; 6] = [
    [0xff, 0xd3, 0x6a],
    [0xff, 0x6b, 0x6b],
    [0xff, 0x9f, 0x43],
    [0x6b, 0xcb, 0xff],
    [0xa7, 0x8b, 0xfa],
    [0xf4, 0x72, 0xb6],
];

/// One spark.
#[derive(Clone, Debug, PartialEq)]
pub struct FireworkParticle {
    /// Position in logical pixels.
    pub pos: Point,
    /// Velocity in px/s.
    pub vel: Vec2,
    /// Age in seconds.
    pub life: f64,
    /// Age at which the spark is removed.
    pub max_life: f64,
    /// Palette color.
    pub color: Color,
    /// Core radius.
    pub size: f64,
}

impl FireworkParticle {
    /// Normalized age in `[0, 1]`.
    pub fn age(&self) -> f64 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Sparks launched together from one origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Burst {
    /// Live sparks.
    pub particles: Vec<FireworkParticle>,
}

/// Launch a burst of 60 to 129 sparks from `origin`.
#[tracing::instrument(skip_all, fields(seed = seed, x = origin.x, y = origin.y))]
pub fn spawn_burst(origin: Point, strength: f64, seed: u32) -> Burst {
    let mut rng = Mulberry32::new(seed);
    let count = (60.0 + rng.next_f64() * 70.0).floor() as usize;
    let particles = (0..count)
        .map(|_| {
            let a = rng.next_f64() * TAU;
            let sp = (80.0 + rng.next_f64() * 260.0) * strength;
            let jitter = (rng.next_f64() - 0.5) * 30.0;
            let max_life = 1.6 + rng.next_f64() * 1.2;
            let [r, g, b] = PALETTE[((rng.next_f64() * PALETTE.len() as f64) as usize)
                .min(PALETTE.len() - 1)];
            let size = 1.0 + rng.next_f64() * 2.4;
            FireworkParticle {
                pos: origin,
                vel: Vec2::new(a.cos() * sp + jitter, a.sin() * sp + jitter),
                life: 0.0,
                max_life,
                color: Color::rgb8(r, g, b),
                size,
            }
        })
        .collect();
    Burst { particles }
}

/// Advance every burst by `dt`; spent sparks and empty bursts are dropped.
pub fn step_fireworks(bursts: &mut Vec<Burst>, dt: f64) {
    let damping = DAMPING_PER_FRAME.powf(dt * 60.0);
    for burst in bursts.iter_mut() {
        for p in &mut burst.particles {
            p.life += dt;
            p.vel.y += GRAVITY * dt;
            p.vel *= damping;
            p.pos += p.vel * dt;
        }
        burst.particles.retain(|p| p.life < p.max_life);
    }
    bursts.retain(|b| !b.particles.is_empty());
}

#[cfg(test)]
#[path = "../../tests/unit/particles/firework.rs"]
mod tests;
