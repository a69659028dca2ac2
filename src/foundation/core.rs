use crate::foundation::error::{QijiError, QijiResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Target surface dimensions in device pixels plus the device pixel ratio.
///
/// All drawing happens in logical units (`device / dpr`); the renderer applies the DPR scale once
/// as its base transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in device pixels.
    pub width_px: u32,
    /// Height in device pixels.
    pub height_px: u32,
    /// Device pixel ratio, finite and > 0.
    pub dpr: f64,
}

impl SurfaceSize {
    /// Create a validated surface size.
    pub fn new(width_px: u32, height_px: u32, dpr: f64) -> QijiResult<Self> {
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(QijiError::validation("dpr must be finite and > 0"));
        }
        Ok(Self {
            width_px,
            height_px,
            dpr,
        })
    }

    /// Surface covering a logical `width x height` area at `dpr`, floored to whole pixels.
    pub fn from_logical(width: f64, height: f64, dpr: f64) -> QijiResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(QijiError::validation(
                "logical surface size must be finite and >= 0",
            ));
        }
        let dpr_ok = if dpr.is_finite() && dpr > 0.0 {
            dpr
        } else {
            return Err(QijiError::validation("dpr must be finite and > 0"));
        };
        Self::new(
            (width * dpr_ok).floor() as u32,
            (height * dpr_ok).floor() as u32,
            dpr_ok,
        )
    }

    /// `true` when either dimension is zero; rendering into it is a no-op.
    pub fn is_empty(self) -> bool {
        self.width_px == 0 || self.height_px == 0
    }

    /// Size in logical drawing units.
    pub fn logical(self) -> Size {
        Size::new(
            f64::from(self.width_px) / self.dpr,
            f64::from(self.height_px) / self.dpr,
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as an array, in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
