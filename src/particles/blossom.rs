use std::f64::consts::TAU;

use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::rng::Mulberry32;

/// Default seed for the blossom field.
pub const DEFAULT_BLOSSOM_SEED: u32 = 20260129;

const PETAL_RATIO: f64 = 0.18;
const GRAVITY: f64 = 85.0;
const DRAG: f64 = 0.42;
const WIND_BASE: f64 = 44.0;
const WIND_WAVE: f64 = 0.7;
const WIND_SCROLL: f64 = 0.22;
const GUST_CHANCE: f64 = 0.011;
const USER_LIFE_MAX: f64 = 1e9;

/// Particle kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlossomKind {
    /// Open flower that drifts in place.
    Blossom,
    /// Single falling petal.
    Petal,
}

/// One blossom or petal, in logical pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct PeachBlossom {
    /// Kind; never changes for a slot.
    pub kind: BlossomKind,
    /// Position.
    pub pos: Point,
    /// Velocity in px/s.
    pub vel: Vec2,
    /// Radius.
    pub r: f64,
    /// Rotation in radians.
    pub rot: f64,
    /// Angular velocity in rad/s.
    pub rot_v: f64,
    /// Petal count, 1 for petals.
    pub petals: u8,
    /// Opening progress in `[0, 1]`, never decreasing.
    pub bloom: f64,
    /// Opening rate per second.
    pub bloom_v: f64,
    /// Age in seconds.
    pub life: f64,
    /// Age at which the slot is recycled.
    pub life_max: f64,
    /// Hue in degrees.
    pub hue: f64,
    /// Saturation in percent.
    pub sat: f64,
    /// Lightness in percent.
    pub light: f64,
    /// Ink depth in `[0, 1]`.
    pub depth: f64,
    /// Sway phase.
    pub phase: f64,
    /// Stable id once the user has touched it.
    pub id: Option<u32>,
    /// Owned by the user: never recycled.
    pub user: bool,
}

fn margin_of(size: Size) -> f64 {
    size.width.min(size.height) * 0.06
}

fn spawn_blossom(rng: &mut Mulberry32, size: Size) -> PeachBlossom {
    let margin = margin_of(size);
    let x = margin + rng.next_f64() * (size.width - margin * 2.0);
    let y = margin + rng.next_f64() * (size.height - margin * 2.0);
    let r = (6.2 + rng.next_f64() * 11.0) * (0.9 + rng.next_f64() * 0.45) * 3.0;
    let petals = if rng.next_f64() > 0.86 { 6 } else { 5 };
    let vx = (rng.next_f64() - 0.5) * 3.0;
    let vy = (rng.next_f64() - 0.5) * 3.0;
    let rot = rng.next_f64() * TAU;
    let rot_v = (rng.next_f64() - 0.5) * 0.35;
    let bloom_v = 0.45 + rng.next_f64() * 0.55;
    let life_max = 10.0 + rng.next_f64() * 14.0;
    let hue = 342.0 + rng.next_f64() * 18.0;
    let depth = rng.next_f64().powf(0.75);
    let sat = 28.0 + depth * 32.0 + rng.next_f64() * 8.0;
    let light = 78.0 - depth * 16.0 + rng.next_f64() * 6.0;
    let phase = rng.next_f64() * TAU;
    PeachBlossom {
        kind: BlossomKind::Blossom,
        pos: Point::new(x, y),
        vel: Vec2::new(vx, vy),
        r,
        rot,
        rot_v,
        petals,
        bloom: 0.0,
        bloom_v,
        life: 0.0,
        life_max,
        hue,
        sat,
        light,
        depth,
        phase,
        id: None,
        user: false,
    }
}

fn spawn_petal(rng: &mut Mulberry32, size: Size) -> PeachBlossom {
    let margin = margin_of(size);
    let x = margin + rng.next_f64() * (size.width - margin * 2.0);
    let y = -margin - rng.next_f64() * size.height * 0.35;
    let r = (4.0 + rng.next_f64() * 8.0) * (0.9 + rng.next_f64() * 0.5) * 1.6;
    let vx = (rng.next_f64() - 0.5) * 22.0;
    let vy = 8.0 + rng.next_f64() * 22.0;
    let rot = rng.next_f64() * TAU;
    let rot_v = (rng.next_f64() - 0.5) * 2.0;
    let bloom_v = 0.35 + rng.next_f64() * 0.45;
    let life_max = 9.0 + rng.next_f64() * 12.0;
    let hue = 342.0 + rng.next_f64() * 18.0;
    let depth = rng.next_f64().powf(0.85);
    let sat = 22.0 + depth * 26.0 + rng.next_f64() * 8.0;
    let light = 82.0 - depth * 14.0 + rng.next_f64() * 6.0;
    let phase = rng.next_f64() * TAU;
    PeachBlossom {
        kind: BlossomKind::Petal,
        pos: Point::new(x, y),
        vel: Vec2::new(vx, vy),
        r,
        rot,
        rot_v,
        petals: 1,
        bloom: 0.0,
        bloom_v,
        life: 0.0,
        life_max,
        hue,
        sat,
        light,
        depth,
        phase,
        id: None,
        user: false,
    }
}

/// Ambient pool of `count` particles, about 18% petals.
pub fn create_peach_blossoms(count: usize, size: Size, seed: u32) -> Vec<PeachBlossom> {
    let mut rng = Mulberry32::new(seed);
    (0..count)
        .map(|_| {
            if rng.next_f64() < PETAL_RATIO {
                spawn_petal(&mut rng, size)
            } else {
                spawn_blossom(&mut rng, size)
            }
        })
        .collect()
}

/// A user-owned blossom pinned at `pos`. Attributes are seeded from `seed ^ floor(x + y)`.
pub fn create_user_blossom(pos: Point, size: Size, seed: u32) -> PeachBlossom {
    let mix = (pos.x + pos.y).floor() as i64 as u32;
    let mut rng = Mulberry32::new(seed ^ mix);
    let mut b = spawn_blossom(&mut rng, size);
    b.pos = pos;
    b.user = true;
    b.life = 0.0;
    b.life_max = USER_LIFE_MAX;
    b.bloom = 0.0;
    b
}

/// Explicit ambient clock for blossom stepping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepClock {
    /// Seconds of simulated time.
    pub elapsed_s: f64,
    /// Number of steps taken.
    pub step_index: u64,
    /// Base seed for respawn randomness.
    pub seed: u32,
}

impl StepClock {
    /// Clock at time zero.
    pub fn new(seed: u32) -> Self {
        Self {
            elapsed_s: 0.0,
            step_index: 0,
            seed,
        }
    }

    /// Move forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed_s += dt;
        self.step_index += 1;
    }

    /// RNG for respawns and gusts during the current step.
    pub fn step_rng(&self) -> Mulberry32 {
        let mix = (self.step_index as u32).wrapping_mul(0x9E37_79B9);
        Mulberry32::new(self.seed ^ mix)
    }
}

/// Advance every particle by `dt` seconds. Returns how many slots were recycled.
///
/// Expired or escaped particles are replaced in place by a fresh one of the same kind, so the
/// slice length (and every user blossom) is preserved.
pub fn step_peach_blossoms(
    items: &mut [PeachBlossom],
    dt: f64,
    size: Size,
    clock: &StepClock,
) -> usize {
    let mut rng = clock.step_rng();
    let t = clock.elapsed_s;
    let margin = margin_of(size);
    let (w, h) = (size.width, size.height);
    let mut recycled = 0;

    for b in items.iter_mut() {
        b.life += dt;
        b.bloom = (b.bloom + dt * b.bloom_v).min(1.0);

        if b.user && b.kind == BlossomKind::Blossom {
            b.rot += b.rot_v * dt * 0.4;
            b.pos.x += (b.phase + t * 0.25).sin() * dt * (0.9 + 1.2 * b.depth);
            b.pos.y += (b.phase * 0.7 + t * 0.2).cos() * dt * (0.7 + 1.0 * b.depth);
            continue;
        }

        match b.kind {
            BlossomKind::Blossom => {
                b.pos += b.vel * dt;
                b.rot += b.rot_v * dt;
                b.pos.x += (b.phase + t * 0.25).sin() * dt * (0.8 + 1.2 * b.depth);
                b.pos.y += (b.phase * 0.7 + t * 0.2).cos() * dt * (0.6 + 1.0 * b.depth);

                let pad = (b.r * 1.8).max(160.0);
                let out = b.pos.x < -pad || b.pos.x > w + pad || b.pos.y < -pad || b.pos.y > h + pad;
                if b.life > b.life_max || out {
                    *b = spawn_blossom(&mut rng, size);
                    recycled += 1;
                }
            }
            BlossomKind::Petal => {
                let wind = WIND_BASE
                    * (b.phase + b.pos.y * 0.0035 * WIND_WAVE + t * WIND_SCROLL).sin()
                    + 18.0 * (b.phase * 0.9 + t * 0.9).sin();
                b.vel.x += wind * dt;
                b.vel.y += GRAVITY * dt;

                let keep = (1.0 - DRAG * dt).max(0.0);
                b.vel *= keep;
                b.vel.y = b.vel.y.min(190.0 + 60.0 * b.depth);

                b.pos += b.vel * dt;
                b.rot += (b.rot_v + b.vel.x * 0.012) * dt;

                if rng.chance(GUST_CHANCE) {
                    b.vel.x += (rng.next_f64() - 0.5) * 26.0;
                    b.vel.y += (rng.next_f64() - 0.5) * 12.0;
                    b.rot_v += (rng.next_f64() - 0.5) * 0.45;
                }

                let pad = (b.r * 2.6).max(120.0);
                let out_bottom = b.pos.y > h + pad;
                let out_side = b.pos.x < -pad || b.pos.x > w + pad;
                if b.life > b.life_max || out_bottom || out_side {
                    let mut nb = spawn_petal(&mut rng, size);
                    nb.pos.x = margin + rng.next_f64() * (w - margin * 2.0);
                    nb.pos.y = -pad - rng.next_f64() * h * 0.2;
                    *b = nb;
                    recycled += 1;
                }
            }
        }
    }
    recycled
}

/// Hit radius for picking a blossom.
pub fn hit_radius(b: &PeachBlossom) -> f64 {
    (b.r * 1.2).max(40.0)
}

/// Blossom pool plus everything needed to step and interact with it.
#[derive(Clone, Debug)]
pub struct BlossomField {
    items: Vec<PeachBlossom>,
    size: Size,
    clock: StepClock,
    ambient_target: usize,
    next_id: u32,
    dragging: Option<u32>,
}

impl BlossomField {
    /// Field with `count` ambient particles over a `size` canvas.
    pub fn new(count: usize, size: Size, seed: u32) -> Self {
        Self {
            items: create_peach_blossoms(count, size, seed),
            size,
            clock: StepClock::new(seed),
            ambient_target: count,
            next_id: 0,
            dragging: None,
        }
    }

    /// All particles, ambient and user-owned.
    pub fn items(&self) -> &[PeachBlossom] {
        &self.items
    }

    /// Canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Ambient clock.
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    /// Id of the blossom being dragged.
    pub fn dragging(&self) -> Option<u32> {
        self.dragging
    }

    /// Advance by `dt` seconds. Negative or non-finite steps are ignored.
    pub fn step(&mut self, dt: f64) -> usize {
        if !dt.is_finite() || dt < 0.0 {
            return 0;
        }
        self.clock.advance(dt);
        let recycled = step_peach_blossoms(&mut self.items, dt, self.size, &self.clock);
        if recycled > 0 {
            tracing::trace!(recycled, step = self.clock.step_index, "blossom slots recycled");
        }
        recycled
    }

    /// Index of the nearest blossom whose hit radius contains `p`.
    pub fn hit_test(&self, p: Point) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == BlossomKind::Blossom)
            .map(|(i, b)| (i, b.pos.distance(p), hit_radius(b)))
            .filter(|&(_, d, radius)| d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _, _)| i)
    }

    fn assign_id(&mut self, index: usize) -> u32 {
        if let Some(id) = self.items[index].id {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items[index].id = Some(id);
        id
    }

    /// Pick the blossom under `p` or plant a new one there, then start dragging it.
    pub fn pointer_down(&mut self, p: Point) -> u32 {
        let index = match self.hit_test(p) {
            Some(i) => {
                let b = &mut self.items[i];
                b.user = true;
                b.life_max = USER_LIFE_MAX;
                i
            }
            None => {
                self.items
                    .push(create_user_blossom(p, self.size, self.clock.seed));
                self.items.len() - 1
            }
        };
        let id = self.assign_id(index);
        self.dragging = Some(id);
        id
    }

    /// Move the dragged blossom to `p`, clamped inside the canvas by a radius-based pad.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        let Some(id) = self.dragging else {
            return false;
        };
        let size = self.size;
        let Some(b) = self.items.iter_mut().find(|b| b.id == Some(id)) else {
            self.dragging = None;
            return false;
        };
        let pad = (b.r * 0.6).min(size.width / 2.0).min(size.height / 2.0).max(0.0);
        b.pos = Point::new(
            p.x.clamp(pad, (size.width - pad).max(pad)),
            p.y.clamp(pad, (size.height - pad).max(pad)),
        );
        b.vel = Vec2::ZERO;
        true
    }

    /// End any drag.
    pub fn pointer_up(&mut self) {
        self.dragging = None;
    }

    /// Adapt to a new canvas size.
    ///
    /// User blossoms keep their relative position (position and velocity scale per axis). The
    /// ambient pool is regenerated when the size changed or its count differs from
    /// `target_count`.
    pub fn resize(&mut self, size: Size, target_count: usize) {
        let old = self.size;
        let sx = if old.width > 0.0 { size.width / old.width } else { 1.0 };
        let sy = if old.height > 0.0 { size.height / old.height } else { 1.0 };

        for b in self.items.iter_mut().filter(|b| b.user) {
            b.pos = Point::new(b.pos.x * sx, b.pos.y * sy);
            b.vel = Vec2::new(b.vel.x * sx, b.vel.y * sy);
        }

        let ambient = self.items.iter().filter(|b| !b.user).count();
        if old != size || ambient != target_count {
            let users: Vec<PeachBlossom> = self.items.drain(..).filter(|b| b.user).collect();
            let mut items = create_peach_blossoms(target_count, size, self.clock.seed);
            items.extend(users);
            self.items = items;
            tracing::debug!(
                width = size.width,
                height = size.height,
                target_count,
                "blossom pool regenerated"
            );
        }
        self.size = size;
        self.ambient_target = target_count;
    }

    /// Ambient particle count requested at creation or the last resize.
    pub fn ambient_target(&self) -> usize {
        self.ambient_target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/blossom.rs"]
mod tests;
