use crate::foundation::color::Color;
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::math::{clamp01, lerp_point};
use crate::generate::Stroke;
use crate::render::painter::Painter;
use crate::render::text::{CardText, TextMeasure, draw_card_text};

/// Visual parameters of the logo card.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoStyle {
    /// Card background.
    pub background: Color,
    /// Stroke color.
    pub color: Color,
    /// Nominal line width.
    pub line_width: f64,
    /// Pointer is over the card: pulse the width and dim slightly.
    pub hover: bool,
    /// Draw-in progress; later strokes lag by 2% each.
    pub draw_in: f64,
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb8(0x0b, 0x0f, 0x1a),
            color: Color::rgb8(0xe6, 0xf2, 0xff),
            line_width: 2.0,
            hover: false,
            draw_in: 1.0,
        }
    }
}

/// Stroke set to draw, optionally blended toward a second set.
#[derive(Clone, Copy, Debug)]
pub struct LogoStrokes<'a> {
    /// Base strokes.
    pub from: &'a [Stroke],
    /// Morph target and progress. Strokes without a counterpart of the same point count are
    /// drawn unmorphed.
    pub to: Option<(&'a [Stroke], f64)>,
}

fn stroke_polyline(points: &[Point], upto: usize) -> Option<BezPath> {
    let (first, rest) = points.split_first()?;
    let mut path = BezPath::new();
    path.move_to(*first);
    for p in rest.iter().take(upto.saturating_sub(1)) {
        path.line_to(*p);
    }
    Some(path)
}

/// Background, strokes, then the text overlay.
pub fn render_logo_card(
    painter: &mut Painter,
    style: &LogoStyle,
    strokes: LogoStrokes<'_>,
    card: Option<&CardText<'_>>,
    time_ms: f64,
    measure: &mut dyn TextMeasure,
) {
    if painter.is_noop() {
        return;
    }
    let size = painter.logical_size();
    painter.fill_rect(Rect::from_origin_size(Point::ZERO, size), style.background);

    let (pulse, alpha) = if style.hover {
        (0.65 + 0.35 * (time_ms / 450.0).sin(), 0.85)
    } else {
        (1.0, 1.0)
    };
    let color = style.color.mul_alpha(alpha);
    let width = (style.line_width * pulse).max(1.0);

    let mut morphed = Vec::new();
    for (i, stroke) in strokes.from.iter().enumerate() {
        let points: &[Point] = match strokes.to {
            Some((to, t)) if i < to.len() && to[i].points.len() == stroke.points.len() => {
                morphed.clear();
                morphed.extend(
                    stroke
                        .points
                        .iter()
                        .zip(&to[i].points)
                        .map(|(a, b)| lerp_point(*a, *b, t)),
                );
                &morphed
            }
            _ => &stroke.points,
        };

        let local = clamp01((style.draw_in - i as f64 * 0.02) / 0.9);
        let upto = ((points.len() as f64 * local).floor() as usize).max(2);
        if let Some(path) = stroke_polyline(points, upto) {
            painter.stroke_path(path, color, width);
        }
    }

    if let Some(card) = card {
        draw_card_text(painter, card, measure);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/logo.rs"]
mod tests;
