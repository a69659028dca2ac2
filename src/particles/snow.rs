use std::f64::consts::TAU;

use crate::foundation::core::{Point, Size};
use crate::foundation::rng::Mulberry32;

/// One snowflake.
#[derive(Clone, Debug, PartialEq)]
pub struct Snowflake {
    /// Position in logical pixels.
    pub pos: Point,
    /// Radius.
    pub r: f64,
    /// Fall speed in px/s.
    pub vy: f64,
    /// Base horizontal drift in px/s.
    pub vx: f64,
    /// Sway phase.
    pub wobble: f64,
    /// Opacity.
    pub alpha: f64,
}

/// `count` flakes scattered over the canvas.
pub fn create_snowflakes(count: usize, size: Size, seed: u32) -> Vec<Snowflake> {
    let mut rng = Mulberry32::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * size.width;
            let y = rng.next_f64() * size.height;
            Snowflake {
                pos: Point::new(x, y),
                r: 0.6 + rng.next_f64() * 2.2,
                vy: 12.0 + rng.next_f64() * 32.0,
                vx: -6.0 + rng.next_f64() * 12.0,
                wobble: rng.next_f64() * TAU,
                alpha: 0.15 + rng.next_f64() * 0.35,
            }
        })
        .collect()
}

/// Advance flakes; those leaving the bottom re-enter at the top at a random x, and the sides wrap.
pub fn step_snow(flakes: &mut [Snowflake], dt: f64, size: Size, rng: &mut Mulberry32) {
    for f in flakes {
        f.wobble += dt * 0.8;
        let sway = f.wobble.sin() * 10.0;
        f.pos.x += (f.vx + sway) * dt;
        f.pos.y += f.vy * dt;

        if f.pos.y > size.height + 10.0 {
            f.pos.y = -10.0;
            f.pos.x = rng.next_f64() * size.width;
        }
        if f.pos.x < -30.0 {
            f.pos.x = size.width + 30.0;
        }
        if f.pos.x > size.width + 30.0 {
            f.pos.x = -30.0;
        }
    }
}
