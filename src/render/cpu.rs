use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8Premul, SurfaceSize};
use crate::foundation::error::{QijiError, QijiResult};
use crate::render::backend::FrameRGBA;
use crate::render::painter::{BlendMode, DrawOp, Painter, TextAlign};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// Gradient images are rebuilt once the cache holds more than this many entries.
const GRADIENT_CACHE_LIMIT: usize = 512;

/// Options for the CPU backend.
#[derive(Debug, Clone, Default)]
pub struct CpuBackendOpts {
    pub(crate) clear_rgba: Option<[u8; 4]>,
    pub(crate) font_bytes: Option<Arc<Vec<u8>>>,
}

impl CpuBackendOpts {
    /// Return options with a configured clear color (straight RGBA8) for every frame.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Return options with a TTF/OTF font used for every text op.
    pub fn with_font_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.font_bytes = Some(Arc::new(bytes));
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct LinearKey {
    top: [u8; 4],
    bottom: [u8; 4],
    w: u32,
    h: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct RadialKey {
    inner: [u8; 4],
    outer: [u8; 4],
    w: u32,
    h: u32,
    // center, r0 and r1 in image pixels, 1/16 px resolution
    cx_q: i64,
    cy_q: i64,
    r0_q: i64,
    r1_q: i64,
}

#[derive(Clone, Copy, Debug)]
struct TextPlacement {
    origin: Point,
    align: TextAlign,
    max_width: Option<f64>,
}

impl TextPlacement {
    /// Layout space to logical space for a line `width` units wide.
    fn local_transform(self, width: f64) -> Affine {
        let k = match self.max_width {
            Some(max) if max > 0.0 && width > max => max / width,
            _ => 1.0,
        };
        let dx = match self.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => width * k / 2.0,
        };
        Affine::translate((self.origin.x - dx, self.origin.y)) * Affine::scale_non_uniform(k, 1.0)
    }
}

struct TextState {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// Executes [`DrawOp`] display lists into [`FrameRGBA`] with `vello_cpu`.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    linear_cache: HashMap<LinearKey, vello_cpu::Image>,
    radial_cache: HashMap<RadialKey, vello_cpu::Image>,
    text: Option<TextState>,
    warned_no_font: bool,
}

impl CpuBackend {
    /// Create a backend. Fails when configured font bytes hold no usable font family.
    pub fn new(opts: CpuBackendOpts) -> QijiResult<Self> {
        let text = match &opts.font_bytes {
            Some(bytes) => Some(TextState {
                engine: TextLayoutEngine::new(bytes)?,
                font: vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    0,
                ),
            }),
            None => None,
        };
        Ok(Self {
            opts,
            ctx: None,
            linear_cache: HashMap::new(),
            radial_cache: HashMap::new(),
            text,
            warned_no_font: false,
        })
    }

    /// Render everything `painter` recorded.
    pub fn render_painter(&mut self, painter: &Painter) -> QijiResult<FrameRGBA> {
        self.render(painter.surface(), painter.ops())
    }

    /// Render a display list onto a fresh `size` surface.
    ///
    /// An empty surface yields a 0x0 frame.
    #[tracing::instrument(
        skip_all,
        fields(width = size.width_px, height = size.height_px, ops = ops.len())
    )]
    pub fn render(&mut self, size: SurfaceSize, ops: &[DrawOp]) -> QijiResult<FrameRGBA> {
        if size.is_empty() {
            return Ok(FrameRGBA::empty());
        }
        let width: u16 = size
            .width_px
            .try_into()
            .map_err(|_| QijiError::render("surface width exceeds u16"))?;
        let height: u16 = size
            .height_px
            .try_into()
            .map_err(|_| QijiError::render("surface height exceeds u16"))?;

        if self.linear_cache.len() + self.radial_cache.len() > GRADIENT_CACHE_LIMIT {
            tracing::debug!(
                entries = self.linear_cache.len() + self.radial_cache.len(),
                "gradient cache cleared"
            );
            self.linear_cache.clear();
            self.radial_cache.clear();
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |this, ctx| {
            if let Some(clear) = this.opts.clear_rgba {
                fill_device(ctx, width, height, clear);
            }

            for op in ops {
                // each additive op gets its own layer so overlapping ops accumulate
                let additive = op_blend(op) == BlendMode::Additive;
                if additive {
                    ctx.push_blend_layer(vello_cpu::peniko::BlendMode::new(
                        vello_cpu::peniko::Mix::Normal,
                        vello_cpu::peniko::Compose::Plus,
                    ));
                }
                this.exec_op(ctx, op, width, height)?;
                if additive {
                    ctx.pop_layer();
                }
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> QijiResult<R>,
    ) -> QijiResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn exec_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        width: u16,
        height: u16,
    ) -> QijiResult<()> {
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::Clear { color } => {
                fill_device(ctx, width, height, color.to_rgba8());
            }
            DrawOp::FillPath {
                path,
                transform,
                color,
                ..
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(paint_color(*color));
                ctx.fill_path(&bezpath_to_cpu(path));
            }
            DrawOp::StrokePath {
                path,
                transform,
                color,
                width: line_width,
                ..
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(paint_color(*color));
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(*line_width)
                        .with_caps(vello_cpu::kurbo::Cap::Round)
                        .with_join(vello_cpu::kurbo::Join::Round),
                );
                ctx.stroke_path(&bezpath_to_cpu(path));
            }
            DrawOp::LinearGradient {
                rect,
                top,
                bottom,
                transform,
            } => {
                let scale = raster_scale(*transform);
                let (iw, ih) = image_extent(*rect, scale);
                let img =
                    self.linear_paint(top.to_rgba8_premul(), bottom.to_rgba8_premul(), iw, ih)?;
                draw_image_rect(ctx, img, *rect, *transform, iw, ih);
            }
            DrawOp::RadialGradient {
                rect,
                center,
                r0,
                r1,
                inner,
                outer,
                transform,
                ..
            } => {
                let scale = raster_scale(*transform);
                let (iw, ih) = image_extent(*rect, scale);
                let sx = f64::from(iw) / rect.width().max(f64::EPSILON);
                let sy = f64::from(ih) / rect.height().max(f64::EPSILON);
                let key = RadialKey {
                    inner: rgba8_premul_array(inner.to_rgba8_premul()),
                    outer: rgba8_premul_array(outer.to_rgba8_premul()),
                    w: iw,
                    h: ih,
                    cx_q: quantize((center.x - rect.x0) * sx),
                    cy_q: quantize((center.y - rect.y0) * sy),
                    r0_q: quantize(r0 * sx),
                    r1_q: quantize(r1 * sx),
                };
                let img = self.radial_paint(key)?;
                draw_image_rect(ctx, img, *rect, *transform, iw, ih);
            }
            DrawOp::Text {
                text,
                origin,
                align,
                size_px,
                color,
                max_width,
                transform,
            } => self.draw_text(
                ctx,
                text,
                TextPlacement {
                    origin: *origin,
                    align: *align,
                    max_width: *max_width,
                },
                *size_px,
                *color,
                *transform,
            )?,
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        placement: TextPlacement,
        size_px: f64,
        color: Color,
        transform: Affine,
    ) -> QijiResult<()> {
        let Some(state) = self.text.as_mut() else {
            if !self.warned_no_font {
                tracing::warn!("no font configured; text ops are skipped");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let layout = state
            .engine
            .layout_line(text, size_px as f32, TextBrushRgba8::from(color))?;
        let tr = transform * placement.local_transform(f64::from(layout.width()));
        ctx.set_transform(affine_to_cpu(tr));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&state.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn linear_paint(
        &mut self,
        top: Rgba8Premul,
        bottom: Rgba8Premul,
        w: u32,
        h: u32,
    ) -> QijiResult<vello_cpu::Image> {
        let key = LinearKey {
            top: rgba8_premul_array(top),
            bottom: rgba8_premul_array(bottom),
            w,
            h,
        };
        if let Some(img) = self.linear_cache.get(&key).cloned() {
            return Ok(img);
        }
        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        let h1 = (h.max(1) - 1) as f32;
        for y in 0..h {
            let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
            let c = lerp_rgba8(key.top, key.bottom, t);
            for x in 0..w {
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&c);
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.linear_cache.insert(key, img.clone());
        Ok(img)
    }

    fn radial_paint(&mut self, key: RadialKey) -> QijiResult<vello_cpu::Image> {
        if let Some(img) = self.radial_cache.get(&key).cloned() {
            return Ok(img);
        }
        let (w, h) = (key.w, key.h);
        let cx = key.cx_q as f32 / 16.0;
        let cy = key.cy_q as f32 / 16.0;
        let r0 = key.r0_q as f32 / 16.0;
        let r1 = key.r1_q as f32 / 16.0;
        let span = r1 - r0;

        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        for y in 0..h {
            for x in 0..w {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let t = if span > 0.0 {
                    ((d - r0) / span).clamp(0.0, 1.0)
                } else if d >= r1 {
                    1.0
                } else {
                    0.0
                };
                let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
                bytes[idx..idx + 4].copy_from_slice(&lerp_rgba8(key.inner, key.outer, t));
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.radial_cache.insert(key, img.clone());
        Ok(img)
    }
}

fn op_blend(op: &DrawOp) -> BlendMode {
    match op {
        DrawOp::FillPath { blend, .. }
        | DrawOp::StrokePath { blend, .. }
        | DrawOp::RadialGradient { blend, .. } => *blend,
        DrawOp::Clear { .. } | DrawOp::LinearGradient { .. } | DrawOp::Text { .. } => {
            BlendMode::Normal
        }
    }
}

fn fill_device(ctx: &mut vello_cpu::RenderContext, width: u16, height: u16, rgba: [u8; 4]) {
    let [r, g, b, a] = rgba;
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));
}

fn paint_color(c: Color) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

/// Device pixels per object unit along the larger axis of `tr`.
fn raster_scale(tr: Affine) -> f64 {
    let [a, b, c, d, _, _] = tr.as_coeffs();
    let sx = (a * a + b * b).sqrt();
    let sy = (c * c + d * d).sqrt();
    let s = sx.max(sy);
    if s.is_finite() && s > 0.0 { s } else { 1.0 }
}

fn image_extent(rect: Rect, scale: f64) -> (u32, u32) {
    let w = (rect.width().abs() * scale).ceil().clamp(1.0, f64::from(u16::MAX)) as u32;
    let h = (rect.height().abs() * scale).ceil().clamp(1.0, f64::from(u16::MAX)) as u32;
    (w, h)
}

fn quantize(v: f64) -> i64 {
    (v * 16.0).round() as i64
}

/// Fill `rect` (object space) with an `iw x ih` image stretched over it.
fn draw_image_rect(
    ctx: &mut vello_cpu::RenderContext,
    img: vello_cpu::Image,
    rect: Rect,
    transform: Affine,
    iw: u32,
    ih: u32,
) {
    let image_to_object = Affine::translate(rect.origin().to_vec2())
        * Affine::scale_non_uniform(
            rect.width() / f64::from(iw),
            rect.height() / f64::from(ih),
        );
    ctx.set_transform(affine_to_cpu(transform * image_to_object));
    ctx.set_paint(img);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(iw),
        f64::from(ih),
    ));
}

fn rgba8_premul_array(c: Rgba8Premul) -> [u8; 4] {
    [c.r, c.g, c.b, c.a]
}

fn lerp_rgba8(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let lerp = |x: u8, y: u8| -> u8 {
        let xf = x as f32;
        let yf = y as f32;
        (xf + (yf - xf) * t).round().clamp(0.0, 255.0) as u8
    };
    [
        lerp(a[0], b[0]),
        lerp(a[1], b[1]),
        lerp(a[2], b[2]),
        lerp(a[3], b[3]),
    ]
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> QijiResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| QijiError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| QijiError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(QijiError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    let may_have_opacities = bytes.chunks_exact(4).any(|px| px[3] != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> QijiResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
