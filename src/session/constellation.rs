use std::f64::consts::TAU;

use crate::foundation::core::Point;
use crate::foundation::error::QijiResult;
use crate::foundation::rng::Mulberry32;
use crate::particles::ink::InkMode;
use crate::render::constellation::{ConstellationStyle, ConstellationView, render_constellation};
use crate::render::painter::Painter;
use crate::render::text::TextMeasure;
use crate::scene::model::{BackgroundV2, ConstellationCardV2, StarPoint};

/// Last step of the drawing guide.
pub const GUIDE_DONE: u8 = 4;

const GUIDE_PROMPTS: [&str; GUIDE_DONE as usize + 1] = [
    "Step 1/4: place the head",
    "Step 2/4: place the front legs (2-3 points)",
    "Step 3/4: place the back legs (2-3 points)",
    "Step 4/4: place the tail",
    "Done: keep adding stars, or save",
];

struct PaletteSpec {
    a: &'static str,
    b: &'static str,
    glow: &'static str,
}

const PALETTES: [PaletteSpec; 3] = [
    PaletteSpec {
        a: "#05070f",
        b: "#0b1530",
        glow: "rgba(120,190,255,1)",
    },
    PaletteSpec {
        a: "#07050f",
        b: "#2a0b30",
        glow: "rgba(255,140,220,1)",
    },
    PaletteSpec {
        a: "#02070a",
        b: "#052a22",
        glow: "rgba(120,255,210,1)",
    },
];

/// State of the user-drawn constellation card.
///
/// Points are placed in normalized coordinates. The guide step names the part the user places
/// next: the head (0), front legs (1), back legs (2) and tail (3). [`GUIDE_DONE`] ends the guide.
#[derive(Clone, Debug)]
pub struct ConstellationSession {
    card: ConstellationCardV2,
    mode: InkMode,
    style: ConstellationStyle,
    guide_step: u8,
    palette_index: usize,
    rng: Mulberry32,
}

impl ConstellationSession {
    /// Session editing `card`; new points draw phase and speed from `seed`.
    pub fn new(card: ConstellationCardV2, seed: u32) -> QijiResult<Self> {
        card.validate()?;
        let guide_step = guide_step_for(card.points.len());
        Ok(Self {
            card,
            mode: InkMode::default(),
            style: ConstellationStyle::default(),
            guide_step,
            palette_index: 0,
            rng: Mulberry32::new(seed),
        })
    }

    /// Current payload.
    pub fn card(&self) -> &ConstellationCardV2 {
        &self.card
    }

    /// Motion mode.
    pub fn mode(&self) -> InkMode {
        self.mode
    }

    /// Change the motion mode.
    pub fn set_mode(&mut self, mode: InkMode) {
        self.mode = mode;
    }

    /// Change the drawing style.
    pub fn set_style(&mut self, style: ConstellationStyle) {
        self.style = style;
    }

    /// Guide step in `0..=GUIDE_DONE`.
    pub fn guide_step(&self) -> u8 {
        self.guide_step
    }

    /// Status line for the current guide step.
    pub fn guide_prompt(&self) -> &'static str {
        GUIDE_PROMPTS[usize::from(self.guide_step.min(GUIDE_DONE))]
    }

    /// Place a star at normalized `(x, y)`; coordinates are clamped into the unit square.
    pub fn add_point(&mut self, p: Point) {
        let phase = self.rng.range(0.0, TAU);
        let speed = self.rng.range(1.0, 2.4);
        self.card
            .points
            .push(StarPoint::free(clamp_unit(p.x), clamp_unit(p.y), phase, speed));
        let n = self.card.points.len();
        self.guide_step = match self.guide_step {
            0 => 1,
            1 if n >= 3 => 2,
            2 if n >= 5 => 3,
            3 => GUIDE_DONE,
            step => step,
        };
    }

    /// Drop the last star. Returns `false` when there was none.
    pub fn undo(&mut self) -> bool {
        let removed = self.card.points.pop().is_some();
        self.guide_step = guide_step_for(self.card.points.len());
        removed
    }

    /// Remove every star and restart the guide.
    pub fn clear(&mut self) {
        self.card.points.clear();
        self.guide_step = 0;
    }

    /// Flip the text between centered and lower third.
    pub fn toggle_template(&mut self) {
        self.card.template = self.card.template.toggled();
    }

    /// Move to the next background palette. Edge and core colors reset to their defaults.
    pub fn cycle_palette(&mut self) {
        self.palette_index = (self.palette_index + 1) % PALETTES.len();
        let p = &PALETTES[self.palette_index];
        let defaults = ConstellationCardV2::default();
        self.card.bg = BackgroundV2 {
            a: p.a.to_owned(),
            b: p.b.to_owned(),
        };
        self.card.glow_color = p.glow.to_owned();
        self.card.line_color = defaults.line_color;
        self.card.point_color = defaults.point_color;
    }

    /// Record one frame at `now_ms`.
    pub fn render(
        &self,
        painter: &mut Painter,
        now_ms: f64,
        measure: &mut dyn TextMeasure,
    ) -> QijiResult<()> {
        let points = self.card.ink_points();
        let view = ConstellationView {
            points: &points,
            mode: self.mode,
            style: self.style,
            palette: self.card.palette()?,
            card: Some(self.card.card_text()?),
        };
        render_constellation(painter, &view, now_ms, measure);
        Ok(())
    }
}

fn guide_step_for(n: usize) -> u8 {
    match n {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5 => 3,
        _ => GUIDE_DONE,
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 }
}

#[cfg(test)]
#[path = "../../tests/unit/session/constellation.rs"]
mod tests;
