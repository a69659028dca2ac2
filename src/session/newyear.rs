use crate::foundation::color::Color;
use crate::foundation::core::{Point, Size};
use crate::foundation::rng::Mulberry32;
use crate::particles::blossom::{BlossomField, DEFAULT_BLOSSOM_SEED};
use crate::particles::firework::{Burst, spawn_burst, step_fireworks};
use crate::particles::snow::{Snowflake, create_snowflakes, step_snow};
use crate::render::effects::{render_blossoms, render_fireworks, render_snow};
use crate::render::painter::Painter;

/// Longest simulated step, in seconds.
pub const MAX_STEP_S: f64 = 0.05;

/// Knobs of a [`NewYearSession`].
#[derive(Clone, Debug, PartialEq)]
pub struct NewYearOpts {
    /// Ambient blossoms and petals.
    pub blossom_count: usize,
    /// Snowflakes; zero disables snow.
    pub snow_count: usize,
    /// Seed of every random draw in the session.
    pub seed: u32,
    /// Paper color under the effects.
    pub background: Color,
}

impl Default for NewYearOpts {
    fn default() -> Self {
        Self {
            blossom_count: 36,
            snow_count: 0,
            seed: DEFAULT_BLOSSOM_SEED,
            background: Color::rgb8(0xfb, 0xf5, 0xec),
        }
    }
}

#[derive(Clone, Debug)]
struct Snow {
    flakes: Vec<Snowflake>,
    rng: Mulberry32,
}

/// Blossoms, fireworks and optional snow over one canvas.
#[derive(Clone, Debug)]
pub struct NewYearSession {
    field: BlossomField,
    bursts: Vec<Burst>,
    snow: Option<Snow>,
    background: Color,
    seed: u32,
    bursts_launched: u32,
    last_ms: Option<f64>,
}

impl NewYearSession {
    /// Session over a logical `size` canvas.
    pub fn new(size: Size, opts: NewYearOpts) -> Self {
        let snow = (opts.snow_count > 0).then(|| Snow {
            flakes: create_snowflakes(opts.snow_count, size, opts.seed),
            rng: Mulberry32::new(opts.seed ^ 0x5EED_F1A4),
        });
        Self {
            field: BlossomField::new(opts.blossom_count, size, opts.seed),
            bursts: Vec::new(),
            snow,
            background: opts.background,
            seed: opts.seed,
            bursts_launched: 0,
            last_ms: None,
        }
    }

    /// Blossom pool.
    pub fn field(&self) -> &BlossomField {
        &self.field
    }

    /// Live bursts.
    pub fn bursts(&self) -> &[Burst] {
        &self.bursts
    }

    /// Snowflakes, empty when snow is off.
    pub fn snowflakes(&self) -> &[Snowflake] {
        self.snow.as_ref().map_or(&[][..], |s| s.flakes.as_slice())
    }

    /// Advance to `now_ms`. The first call only records the clock.
    ///
    /// Returns the simulated step in seconds, clamped to `[0, MAX_STEP_S]`.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() => ((now_ms - last) / 1000.0).clamp(0.0, MAX_STEP_S),
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        self.step(dt);
        dt
    }

    /// Advance every system by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.field.step(dt);
        step_fireworks(&mut self.bursts, dt);
        let size = self.field.size();
        if let Some(snow) = &mut self.snow {
            step_snow(&mut snow.flakes, dt, size, &mut snow.rng);
        }
    }

    /// Launch a burst at `origin`. Each burst draws its seed from the session counter.
    pub fn launch_burst(&mut self, origin: Point, strength: f64) {
        let seed = self
            .seed
            .wrapping_add(self.bursts_launched.wrapping_mul(0x9E37_79B9));
        self.bursts_launched = self.bursts_launched.wrapping_add(1);
        self.bursts.push(spawn_burst(origin, strength, seed));
    }

    /// Grab or plant a blossom at `p`.
    pub fn pointer_down(&mut self, p: Point) -> u32 {
        self.field.pointer_down(p)
    }

    /// Drag the held blossom.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.field.pointer_move(p)
    }

    /// Release the held blossom.
    pub fn pointer_up(&mut self) {
        self.field.pointer_up();
    }

    /// Adapt to a new logical canvas size. Snow is rescattered.
    pub fn resize(&mut self, size: Size) {
        if size == self.field.size() {
            return;
        }
        let target = self.field.ambient_target();
        self.field.resize(size, target);
        if let Some(snow) = &mut self.snow {
            snow.flakes = create_snowflakes(snow.flakes.len(), size, self.seed);
        }
    }

    /// Paper, blossoms, fireworks, then snow.
    pub fn render(&self, painter: &mut Painter) {
        if painter.is_noop() {
            return;
        }
        painter.clear(self.background);
        render_blossoms(painter, self.field.items());
        render_fireworks(painter, &self.bursts);
        if let Some(snow) = &self.snow {
            render_snow(painter, &snow.flakes);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/newyear.rs"]
mod tests;
