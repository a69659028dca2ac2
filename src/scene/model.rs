use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::Point;
use crate::foundation::error::{QijiError, QijiResult};
use crate::generate::Variant;
use crate::generate::horse::HorseStrokeParams;
use crate::generate::template::horse_template_points;
use crate::particles::ink::{InkPoint, StrokeRef};
use crate::render::constellation::StarPalette;
use crate::render::logo::LogoStyle;
use crate::render::text::{CardText, Template};

/// Range accepted for `logo.strokeCount`.
pub const STROKE_COUNT_RANGE: std::ops::RangeInclusive<u32> = 1..=512;
/// Range accepted for `logo.pointsPerStroke`.
pub const POINTS_PER_STROKE_RANGE: std::ops::RangeInclusive<u32> = 2..=1024;

/// Background of a logo card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasV1 {
    /// CSS color.
    pub background: String,
}

impl Default for CanvasV1 {
    fn default() -> Self {
        Self {
            background: "#0b0f1a".to_owned(),
        }
    }
}

/// Generator and stroke styling of a logo card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogoParamsV1 {
    /// Generator seed; reduced to 32 bits with wrapping.
    pub seed: i64,
    /// Variant tag (`"a"`, `"b"`, `"c"`).
    pub variant: String,
    /// Number of strokes.
    pub stroke_count: u32,
    /// Points per stroke.
    pub points_per_stroke: u32,
    /// CSS stroke color.
    pub color: String,
    /// Stroke width in logical pixels.
    pub line_width: f64,
}

impl Default for LogoParamsV1 {
    fn default() -> Self {
        Self {
            seed: 20260128,
            variant: "a".to_owned(),
            stroke_count: 28,
            points_per_stroke: 48,
            color: "#e6f2ff".to_owned(),
            line_width: 2.0,
        }
    }
}

/// Text overlay of a logo card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardV1 {
    /// Content; `\n` for hard breaks.
    pub text: String,
    /// Block placement.
    pub template_id: Template,
    /// CSS font family (informational; rendering uses the configured font).
    pub font_family: String,
    /// Font size in logical pixels.
    pub font_size: f64,
    /// CSS text color.
    pub text_color: String,
}

impl Default for CardV1 {
    fn default() -> Self {
        Self {
            text: "新春快乐\n愿你我奔赴热爱".to_owned(),
            template_id: Template::Center,
            font_family: "system-ui".to_owned(),
            font_size: 56.0,
            text_color: "#ffffff".to_owned(),
        }
    }
}

/// Version 1 payload: the calligraphy logo card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoCardV1 {
    /// Background.
    pub canvas: CanvasV1,
    /// Generator parameters.
    pub logo: LogoParamsV1,
    /// Text overlay.
    pub card: CardV1,
}

impl LogoCardV1 {
    /// Check colors and ranges.
    pub fn validate(&self) -> QijiResult<()> {
        parse_color("canvas.background", &self.canvas.background)?;
        parse_color("logo.color", &self.logo.color)?;
        parse_color("card.textColor", &self.card.text_color)?;
        if !STROKE_COUNT_RANGE.contains(&self.logo.stroke_count) {
            return Err(QijiError::validation(format!(
                "logo.strokeCount must be in {STROKE_COUNT_RANGE:?}, got {}",
                self.logo.stroke_count
            )));
        }
        if !POINTS_PER_STROKE_RANGE.contains(&self.logo.points_per_stroke) {
            return Err(QijiError::validation(format!(
                "logo.pointsPerStroke must be in {POINTS_PER_STROKE_RANGE:?}, got {}",
                self.logo.points_per_stroke
            )));
        }
        if !self.logo.line_width.is_finite() || self.logo.line_width <= 0.0 {
            return Err(QijiError::validation("logo.lineWidth must be finite and > 0"));
        }
        check_font_size("card.fontSize", self.card.font_size)
    }

    /// 32-bit generator seed.
    pub fn seed_u32(&self) -> u32 {
        self.logo.seed as u32
    }

    /// Generator parameters for a `width x height` drawing area.
    pub fn horse_params(&self, width: f64, height: f64) -> HorseStrokeParams {
        HorseStrokeParams {
            seed: self.seed_u32(),
            variant: Variant::parse_lenient(&self.logo.variant),
            stroke_count: self.logo.stroke_count as usize,
            points_per_stroke: self.logo.points_per_stroke as usize,
            width,
            height,
        }
    }

    /// Stroke style with parsed colors.
    pub fn logo_style(&self) -> QijiResult<LogoStyle> {
        Ok(LogoStyle {
            background: parse_color("canvas.background", &self.canvas.background)?,
            color: parse_color("logo.color", &self.logo.color)?,
            line_width: self.logo.line_width,
            ..LogoStyle::default()
        })
    }

    /// Text overlay with parsed color.
    pub fn card_text(&self) -> QijiResult<CardText<'_>> {
        Ok(CardText {
            text: &self.card.text,
            template: self.card.template_id,
            size_px: self.card.font_size,
            color: parse_color("card.textColor", &self.card.text_color)?,
        })
    }
}

/// A star in normalized coordinates.
///
/// Template stars also carry their stroke membership so stroke edges survive a save/load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarPoint {
    /// Horizontal position in `[0, 1]`.
    pub x: f64,
    /// Vertical position in `[0, 1]`.
    pub y: f64,
    /// Twinkle phase.
    pub phase: f64,
    /// Twinkle rate.
    pub speed: f64,
    /// Template stroke this star belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_id: Option<u32>,
    /// Position within that stroke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_order: Option<u32>,
}

impl StarPoint {
    /// A star placed by hand, outside any stroke.
    pub fn free(x: f64, y: f64, phase: f64, speed: f64) -> Self {
        Self {
            x,
            y,
            phase,
            speed,
            stroke_id: None,
            stroke_order: None,
        }
    }
}

impl From<&InkPoint> for StarPoint {
    fn from(p: &InkPoint) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            phase: p.phase,
            speed: p.speed,
            stroke_id: p.stroke.map(|s| s.stroke_id),
            stroke_order: p.stroke.map(|s| s.order),
        }
    }
}

/// Two-stop vertical background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundV2 {
    /// Top CSS color.
    pub a: String,
    /// Bottom CSS color.
    pub b: String,
}

impl Default for BackgroundV2 {
    fn default() -> Self {
        Self {
            a: "#05070f".to_owned(),
            b: "#0b1530".to_owned(),
        }
    }
}

/// Text overlay of a constellation card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextV2 {
    /// Content.
    pub content: String,
    /// CSS color.
    pub color: String,
    /// Font size in logical pixels.
    pub font_size: f64,
    /// CSS font family (informational).
    pub font_family: String,
    /// CSS font weight (informational).
    pub weight: u16,
}

impl Default for TextV2 {
    fn default() -> Self {
        Self {
            content: "新年快乐 / Happy New Year".to_owned(),
            color: "rgba(255,255,255,0.92)".to_owned(),
            font_size: 44.0,
            font_family: "ui-sans-serif, system-ui, -apple-system, Segoe UI, Inter, Arial"
                .to_owned(),
            weight: 600,
        }
    }
}

/// Version 2 payload: the user-drawn constellation card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstellationCardV2 {
    /// Stars in placement order.
    pub points: Vec<StarPoint>,
    /// Background gradient.
    pub bg: BackgroundV2,
    /// Edge color.
    pub line_color: String,
    /// Star core color.
    pub point_color: String,
    /// Halo color.
    pub glow_color: String,
    /// Text placement.
    pub template: Template,
    /// Text overlay.
    pub text: TextV2,
}

impl Default for ConstellationCardV2 {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            bg: BackgroundV2::default(),
            line_color: "rgba(170, 210, 255, 1)".to_owned(),
            point_color: "rgba(255, 255, 255, 1)".to_owned(),
            glow_color: "rgba(120, 190, 255, 1)".to_owned(),
            template: Template::Center,
            text: TextV2::default(),
        }
    }
}

impl ConstellationCardV2 {
    /// Check colors, font size and point coordinates.
    pub fn validate(&self) -> QijiResult<()> {
        self.palette()?;
        parse_color("text.color", &self.text.color)?;
        check_font_size("text.fontSize", self.text.font_size)?;
        for (i, p) in self.points.iter().enumerate() {
            if ![p.x, p.y, p.phase, p.speed].iter().all(|v| v.is_finite()) {
                return Err(QijiError::validation(format!(
                    "points[{i}] has a non-finite field"
                )));
            }
        }
        Ok(())
    }

    /// Parsed colors.
    pub fn palette(&self) -> QijiResult<StarPalette> {
        Ok(StarPalette {
            bg_top: parse_color("bg.a", &self.bg.a)?,
            bg_bottom: parse_color("bg.b", &self.bg.b)?,
            line: parse_color("lineColor", &self.line_color)?,
            point: parse_color("pointColor", &self.point_color)?,
            glow: parse_color("glowColor", &self.glow_color)?,
        })
    }

    /// The horse template as a ready-made constellation.
    pub fn from_template(seed: u32) -> Self {
        Self {
            points: horse_template_points(seed).iter().map(StarPoint::from).collect(),
            ..Self::default()
        }
    }

    /// Stars as renderable points; ids follow placement order.
    pub fn ink_points(&self) -> Vec<InkPoint> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut ink = InkPoint::free(i as u32, Point::new(p.x, p.y), p.phase, p.speed);
                if let (Some(stroke_id), Some(order)) = (p.stroke_id, p.stroke_order) {
                    ink.stroke = Some(StrokeRef { stroke_id, order });
                }
                ink
            })
            .collect()
    }

    /// Text overlay with parsed color.
    pub fn card_text(&self) -> QijiResult<CardText<'_>> {
        Ok(CardText {
            text: &self.text.content,
            template: self.template,
            size_px: self.text.font_size,
            color: parse_color("text.color", &self.text.color)?,
        })
    }
}

/// A persisted card of either known version.
#[derive(Debug, Clone, PartialEq)]
pub enum SharedScene {
    /// `version: 1`.
    Logo(LogoCardV1),
    /// `version: 2`.
    Constellation(ConstellationCardV2),
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    version: u32,
    #[serde(flatten)]
    body: &'a T,
}

impl SharedScene {
    /// Payload version tag.
    pub fn version(&self) -> u32 {
        match self {
            Self::Logo(_) => 1,
            Self::Constellation(_) => 2,
        }
    }

    /// Parse and validate a payload.
    ///
    /// The `version` tag is read before anything else; an unknown, missing or non-integer tag is
    /// [`QijiError::Incompatible`] and no other field is interpreted.
    pub fn from_json_str(s: &str) -> QijiResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| QijiError::serde(format!("parse scene JSON: {e}")))?;
        Self::from_json_value(value)
    }

    /// Same as [`SharedScene::from_json_str`] for an already parsed value.
    pub fn from_json_value(value: serde_json::Value) -> QijiResult<Self> {
        let version = value
            .get("version")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| QijiError::incompatible("scene has no integer version tag"))?;

        let scene = match version {
            1 => Self::Logo(
                serde_json::from_value(value)
                    .map_err(|e| QijiError::serde(format!("decode logo card: {e}")))?,
            ),
            2 => {
                if !value.get("points").is_some_and(serde_json::Value::is_array) {
                    return Err(QijiError::incompatible(
                        "constellation scene has no points array",
                    ));
                }
                Self::Constellation(
                    serde_json::from_value(value)
                        .map_err(|e| QijiError::serde(format!("decode constellation card: {e}")))?,
                )
            }
            other => {
                return Err(QijiError::incompatible(format!(
                    "unsupported scene version {other}"
                )));
            }
        };
        scene.validate()?;
        Ok(scene)
    }

    /// Parse `s`, or log why not and return `fallback`.
    pub fn from_json_or_default(s: &str, fallback: SharedScene) -> SharedScene {
        match Self::from_json_str(s) {
            Ok(scene) => scene,
            Err(err) => {
                tracing::warn!(error = %err, "scene payload ignored, using defaults");
                fallback
            }
        }
    }

    /// Validate the contained card.
    pub fn validate(&self) -> QijiResult<()> {
        match self {
            Self::Logo(card) => card.validate(),
            Self::Constellation(card) => card.validate(),
        }
    }

    /// Payload with its `version` tag.
    pub fn to_json_value(&self) -> QijiResult<serde_json::Value> {
        let out = match self {
            Self::Logo(body) => serde_json::to_value(Tagged { version: 1, body }),
            Self::Constellation(body) => serde_json::to_value(Tagged { version: 2, body }),
        };
        out.map_err(|e| QijiError::serde(format!("encode scene: {e}")))
    }

    /// Pretty-printed payload.
    pub fn to_json_string(&self) -> QijiResult<String> {
        serde_json::to_string_pretty(&self.to_json_value()?)
            .map_err(|e| QijiError::serde(format!("encode scene: {e}")))
    }
}

fn parse_color(field: &str, css: &str) -> QijiResult<Color> {
    Color::parse(css).map_err(|e| QijiError::validation(format!("{field}: {e}")))
}

fn check_font_size(field: &str, v: f64) -> QijiResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(QijiError::validation(format!("{field} must be finite and > 0")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
