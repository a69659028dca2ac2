use std::borrow::Cow;

use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::{QijiError, QijiResult};
use crate::render::painter::{Painter, TextAlign};

/// Where the card text block sits on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Template {
    /// Centered block, centered lines.
    #[default]
    Center,
    /// Left-aligned block anchored to the bottom padding.
    LowerThird,
}

impl Template {
    /// The other template.
    pub fn toggled(self) -> Self {
        match self {
            Self::Center => Self::LowerThird,
            Self::LowerThird => Self::Center,
        }
    }
}

/// Horizontal advance of a single line of text.
pub trait TextMeasure {
    /// Width of `text` at `size_px`, in the same units as `size_px`.
    fn measure(&mut self, text: &str, size_px: f64) -> f64;
}

/// Font-free estimate: full-width CJK glyphs are 1em, spaces 0.3em, everything else 0.56em.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMeasure;

impl ApproxMeasure {
    fn advance_em(c: char) -> f64 {
        if c.is_whitespace() {
            return 0.3;
        }
        if is_wide(c) { 1.0 } else { 0.56 }
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure(&mut self, text: &str, size_px: f64) -> f64 {
        text.chars().map(Self::advance_em).sum::<f64>() * size_px
    }
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x2FFFD
        | 0x30000..=0x3FFFD)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Color> for TextBrushRgba8 {
    fn from(c: Color) -> Self {
        let [r, g, b, a] = c.to_rgba8();
        Self { r, g, b, a }
    }
}

/// Parley contexts plus one registered font family.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and keep its first family for every layout.
    pub(crate) fn new(font_bytes: &[u8]) -> QijiResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| QijiError::validation("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| QijiError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Shape one unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> QijiResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QijiError::validation("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Measures with a real font through Parley.
pub struct FontMeasure {
    engine: TextLayoutEngine,
}

impl FontMeasure {
    /// Load a measurer from TTF/OTF bytes.
    pub fn new(font_bytes: &[u8]) -> QijiResult<Self> {
        Ok(Self {
            engine: TextLayoutEngine::new(font_bytes)?,
        })
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&mut self, text: &str, size_px: f64) -> f64 {
        match self
            .engine
            .layout_line(text, size_px as f32, TextBrushRgba8::default())
        {
            Ok(layout) => f64::from(layout.width()),
            Err(_) => 0.0,
        }
    }
}

/// Greedy line breaking.
///
/// Hard breaks (`\n`) are kept; a blank source line yields an empty output line. A line that
/// contains whitespace wraps at words (re-joined with single spaces); any other line wraps between
/// characters. A token wider than `max_width` still gets its own line.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    size_px: f64,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.split('\n') {
        let s = raw.trim_end();
        if s.is_empty() {
            out.push(String::new());
            continue;
        }

        let has_spaces = s.chars().any(char::is_whitespace);
        let tokens: Vec<Cow<'_, str>> = if has_spaces {
            s.split_whitespace().map(Cow::Borrowed).collect()
        } else {
            s.chars().map(|c| Cow::Owned(c.to_string())).collect()
        };

        let mut line = String::new();
        for tok in tokens {
            let candidate = if line.is_empty() {
                tok.to_string()
            } else if has_spaces {
                format!("{line} {tok}")
            } else {
                format!("{line}{tok}")
            };
            if measure.measure(&candidate, size_px) <= max_width {
                line = candidate;
            } else {
                if !line.is_empty() {
                    out.push(std::mem::take(&mut line));
                }
                line = tok.into_owned();
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }
    out
}

/// Text overlay of a card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardText<'a> {
    /// Content, `\n` for hard breaks.
    pub text: &'a str,
    /// Block placement.
    pub template: Template,
    /// Font size in logical units.
    pub size_px: f64,
    /// Fill color.
    pub color: Color,
}

/// Computed placement of a wrapped text block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Wrapped lines, top to bottom.
    pub lines: Vec<String>,
    /// Anchor of the first line (top edge).
    pub origin: Point,
    /// Anchoring of every line.
    pub align: TextAlign,
    /// Distance between consecutive line tops.
    pub line_height: f64,
    /// Width budget used for wrapping.
    pub max_width: f64,
}

/// Wrap and place `card` on a `width x height` logical surface.
pub fn layout_card_text(
    card: &CardText<'_>,
    width: f64,
    height: f64,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let padding = (width.min(height) * 0.06).max(24.0);
    let max_width = (width - padding * 2.0).max(200.0);
    let lines = wrap_text(card.text, max_width, card.size_px, measure);
    let line_height = (card.size_px * 1.28).round();
    let block_height = lines.len() as f64 * line_height;

    let (origin, align) = match card.template {
        Template::LowerThird => (
            Point::new(padding, (height - padding - block_height).max(padding)),
            TextAlign::Left,
        ),
        Template::Center => (
            Point::new(width / 2.0, ((height - block_height) / 2.0).max(padding)),
            TextAlign::Center,
        ),
    };

    TextBlock {
        lines,
        origin,
        align,
        line_height,
        max_width,
    }
}

/// Record the card text block into `painter`.
pub fn draw_card_text(painter: &mut Painter, card: &CardText<'_>, measure: &mut dyn TextMeasure) {
    if painter.is_noop() || card.text.is_empty() {
        return;
    }
    let size = painter.logical_size();
    let block = layout_card_text(card, size.width, size.height, measure);
    for (i, line) in block.lines.iter().enumerate() {
        let origin = Point::new(
            block.origin.x,
            block.origin.y + i as f64 * block.line_height,
        );
        painter.fill_text(
            line,
            origin,
            block.align,
            card.size_px,
            card.color,
            Some(block.max_width),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
