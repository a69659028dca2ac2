use crate::animation::morph::{Morph, MorphController};
use crate::foundation::core::Size;
use crate::foundation::error::QijiResult;
use crate::generate::horse::generate_horse_strokes;
use crate::generate::{Stroke, Variant};
use crate::render::logo::{LogoStrokes, render_logo_card};
use crate::render::painter::Painter;
use crate::render::text::TextMeasure;
use crate::scene::model::LogoCardV1;

/// Duration of the variant morph.
pub const LOGO_MORPH_MS: f64 = 800.0;

/// State of the calligraphy logo card.
///
/// `strokes` always reflects the card's current seed and variant at the current size; the morph
/// keeps the previous set around only while a transition is in flight.
#[derive(Clone, Debug)]
pub struct LogoSession {
    card: LogoCardV1,
    size: Size,
    strokes: Vec<Stroke>,
    morph: Morph<Vec<Stroke>>,
    hover: bool,
}

impl LogoSession {
    /// Session for `card` on a logical `size` canvas. The card must validate.
    pub fn new(card: LogoCardV1, size: Size) -> QijiResult<Self> {
        card.validate()?;
        let strokes = strokes_for(&card, size);
        Ok(Self {
            card,
            size,
            morph: Morph::new(Vec::new(), Vec::new(), MorphController::new(LOGO_MORPH_MS)),
            strokes,
            hover: false,
        })
    }

    /// Current payload.
    pub fn card(&self) -> &LogoCardV1 {
        &self.card
    }

    /// Logical canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Strokes of the active variant.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Stroke morph.
    pub fn morph(&self) -> &Morph<Vec<Stroke>> {
        &self.morph
    }

    /// Pointer hover state, which pulses the stroke width.
    pub fn set_hover(&mut self, hover: bool) {
        self.hover = hover;
    }

    /// Switch to the next variant and morph toward it starting at `now_ms`.
    ///
    /// Does nothing on an empty canvas and returns the variant that is active afterwards.
    pub fn morph_to_next(&mut self, now_ms: f64) -> Variant {
        let current = Variant::parse_lenient(&self.card.logo.variant);
        if !drawable(self.size) {
            return current;
        }
        let next = current.next();
        self.card.logo.variant = next.as_str().to_owned();
        let to = strokes_for(&self.card, self.size);
        let from = std::mem::replace(&mut self.strokes, to.clone());
        self.morph.retarget(from, to, now_ms);
        tracing::debug!(variant = next.as_str(), now_ms, "logo morph started");
        next
    }

    /// Next seed; the strokes regenerate without a morph.
    pub fn reseed(&mut self) {
        self.card.logo.seed = self.card.logo.seed.wrapping_add(1);
        self.regenerate();
    }

    /// Replace the card, for example after loading a share.
    pub fn set_card(&mut self, card: LogoCardV1) -> QijiResult<()> {
        card.validate()?;
        self.card = card;
        self.regenerate();
        Ok(())
    }

    /// Adapt to a new logical canvas size.
    pub fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.regenerate();
    }

    /// Advance the morph clock; returns the morph progress.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        self.morph.tick(now_ms)
    }

    /// Record one frame at `now_ms`.
    pub fn render(
        &self,
        painter: &mut Painter,
        now_ms: f64,
        measure: &mut dyn TextMeasure,
    ) -> QijiResult<()> {
        let mut style = self.card.logo_style()?;
        style.hover = self.hover;
        let card = self.card.card_text()?;

        let t = self.morph.controller().progress();
        let strokes = if self.morph.ready() && t > 0.0 && t < 1.0 {
            LogoStrokes {
                from: self.morph.from(),
                to: Some((self.morph.to(), t)),
            }
        } else {
            LogoStrokes {
                from: &self.strokes,
                to: None,
            }
        };
        render_logo_card(painter, &style, strokes, Some(&card), now_ms, measure);
        Ok(())
    }

    fn regenerate(&mut self) {
        self.strokes = strokes_for(&self.card, self.size);
        self.morph = Morph::new(Vec::new(), Vec::new(), MorphController::new(LOGO_MORPH_MS));
    }
}

fn strokes_for(card: &LogoCardV1, size: Size) -> Vec<Stroke> {
    if !drawable(size) {
        return Vec::new();
    }
    generate_horse_strokes(&card.horse_params(size.width, size.height))
}

fn drawable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/session/logo.rs"]
mod tests;
