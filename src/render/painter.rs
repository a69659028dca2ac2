use kurbo::Shape;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Size, SurfaceSize, Vec2};

/// How an op combines with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// Additive ("lighter").
    Additive,
}

/// Horizontal anchoring of a text line relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Origin is the left edge.
    #[default]
    Left,
    /// Origin is the horizontal center.
    Center,
}

/// One recorded drawing operation. Geometry is in logical units; `transform` maps it to device
/// pixels and already includes the DPR scale.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Fill the whole surface.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Fill a path (non-zero).
    FillPath {
        /// Path geometry.
        path: BezPath,
        /// Object-to-device transform.
        transform: Affine,
        /// Fill color.
        color: Color,
        /// Compositing.
        blend: BlendMode,
    },
    /// Stroke a path with round caps and joins.
    StrokePath {
        /// Path geometry.
        path: BezPath,
        /// Object-to-device transform.
        transform: Affine,
        /// Stroke color.
        color: Color,
        /// Line width in logical units.
        width: f64,
        /// Compositing.
        blend: BlendMode,
    },
    /// Fill `rect` with a two-circle radial gradient centered on `center`.
    RadialGradient {
        /// Area to fill.
        rect: Rect,
        /// Gradient center.
        center: Point,
        /// Radius where `inner` ends.
        r0: f64,
        /// Radius where `outer` starts.
        r1: f64,
        /// Color inside `r0`.
        inner: Color,
        /// Color outside `r1`.
        outer: Color,
        /// Object-to-device transform.
        transform: Affine,
        /// Compositing.
        blend: BlendMode,
    },
    /// Fill `rect` with a top-to-bottom gradient.
    LinearGradient {
        /// Area to fill.
        rect: Rect,
        /// Color at the top edge.
        top: Color,
        /// Color at the bottom edge.
        bottom: Color,
        /// Object-to-device transform.
        transform: Affine,
    },
    /// A single line of text whose top edge sits at `origin.y`.
    Text {
        /// Content.
        text: String,
        /// Anchor point.
        origin: Point,
        /// Horizontal anchoring.
        align: TextAlign,
        /// Font size in logical units.
        size_px: f64,
        /// Fill color.
        color: Color,
        /// Lines wider than this are squeezed horizontally to fit.
        max_width: Option<f64>,
        /// Object-to-device transform.
        transform: Affine,
    },
}

/// Display-list recorder with a canvas-like transform stack.
///
/// The base transform is the DPR scale, so callers draw in logical units. A painter for an empty
/// surface records nothing.
#[derive(Clone, Debug)]
pub struct Painter {
    size: SurfaceSize,
    current: Affine,
    blend: BlendMode,
    stack: Vec<(Affine, BlendMode)>,
    ops: Vec<DrawOp>,
}

impl Painter {
    /// Recorder for `size`.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            current: Affine::scale(size.dpr),
            blend: BlendMode::Normal,
            stack: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Target surface.
    pub fn surface(&self) -> SurfaceSize {
        self.size
    }

    /// Drawable area in logical units.
    pub fn logical_size(&self) -> Size {
        self.size.logical()
    }

    /// `true` when nothing will ever be recorded.
    pub fn is_noop(&self) -> bool {
        self.size.is_empty()
    }

    /// Recorded operations.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Consume the recorder.
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Push transform and blend state.
    pub fn save(&mut self) {
        self.stack.push((self.current, self.blend));
    }

    /// Pop transform and blend state. Unbalanced calls are ignored.
    pub fn restore(&mut self) {
        if let Some((t, b)) = self.stack.pop() {
            self.current = t;
            self.blend = b;
        }
    }

    /// Pre-multiply a translation.
    pub fn translate(&mut self, v: impl Into<Vec2>) {
        self.current *= Affine::translate(v.into());
    }

    /// Pre-multiply a rotation in radians.
    pub fn rotate(&mut self, radians: f64) {
        self.current *= Affine::rotate(radians);
    }

    /// Pre-multiply a uniform scale.
    pub fn scale(&mut self, s: f64) {
        self.current *= Affine::scale(s);
    }

    /// Current compositing mode.
    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Set compositing for subsequent ops.
    pub fn set_blend(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    fn visible(&self, color: Color) -> bool {
        !self.is_noop() && color.a > 0.0
    }

    /// Fill the entire surface, ignoring the transform.
    pub fn clear(&mut self, color: Color) {
        if !self.is_noop() {
            self.ops.push(DrawOp::Clear { color });
        }
    }

    /// Fill a path.
    pub fn fill_path(&mut self, path: BezPath, color: Color) {
        if !self.visible(color) {
            return;
        }
        self.ops.push(DrawOp::FillPath {
            path,
            transform: self.current,
            color,
            blend: self.blend,
        });
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_path(rect.to_path(0.1), color);
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        self.fill_path(kurbo::Circle::new(center, radius).to_path(0.1), color);
    }

    /// Stroke a path.
    pub fn stroke_path(&mut self, path: BezPath, color: Color, width: f64) {
        if !self.visible(color) || width <= 0.0 || !width.is_finite() {
            return;
        }
        self.ops.push(DrawOp::StrokePath {
            path,
            transform: self.current,
            color,
            width,
            blend: self.blend,
        });
    }

    /// Stroke a straight segment.
    pub fn stroke_line(&mut self, a: Point, b: Point, color: Color, width: f64) {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        self.stroke_path(path, color, width);
    }

    /// Fill `rect` with a radial gradient from `inner` (inside `r0`) to `outer` (beyond `r1`).
    #[allow(clippy::too_many_arguments)]
    pub fn radial_gradient(
        &mut self,
        rect: Rect,
        center: Point,
        r0: f64,
        r1: f64,
        inner: Color,
        outer: Color,
    ) {
        if self.is_noop() || (inner.a <= 0.0 && outer.a <= 0.0) || rect.area() <= 0.0 {
            return;
        }
        self.ops.push(DrawOp::RadialGradient {
            rect,
            center,
            r0,
            r1,
            inner,
            outer,
            transform: self.current,
            blend: self.blend,
        });
    }

    /// Soft disk fading from `inner` at the center to `outer` at `radius`.
    pub fn radial_glow(&mut self, center: Point, radius: f64, inner: Color, outer: Color) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let rect = Rect::from_center_size(center, (radius * 2.0, radius * 2.0));
        self.radial_gradient(rect, center, 0.0, radius, inner, outer);
    }

    /// Fill `rect` with a vertical gradient.
    pub fn linear_gradient_rect(&mut self, rect: Rect, top: Color, bottom: Color) {
        if self.is_noop() || (top.a <= 0.0 && bottom.a <= 0.0) {
            return;
        }
        self.ops.push(DrawOp::LinearGradient {
            rect,
            top,
            bottom,
            transform: self.current,
        });
    }

    /// Draw one line of text with its top edge at `origin.y`, squeezed to `max_width` if wider.
    pub fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        align: TextAlign,
        size_px: f64,
        color: Color,
        max_width: Option<f64>,
    ) {
        if !self.visible(color) || text.is_empty() || size_px <= 0.0 {
            return;
        }
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            origin,
            align,
            size_px,
            color,
            max_width,
            transform: self.current,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
