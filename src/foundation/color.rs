use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{QijiError, QijiResult};

/// Straight-alpha color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Build from normalized channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Build from hue in degrees and saturation/lightness in `[0, 1]`.
    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        hsla_to_rgba(h, s, l, a)
    }

    /// Same color with alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Same color with alpha multiplied by `k`.
    pub fn mul_alpha(self, k: f64) -> Self {
        Self {
            a: self.a * k,
            ..self
        }
    }

    /// Parse a CSS color string: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()`, `hsl()`,
    /// `hsla()`.
    pub fn parse(s: &str) -> QijiResult<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return parse_hex(s).map_err(QijiError::validation);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba").or_else(|| function_args(&lower, "rgb")) {
            return parse_rgb_args(args).map_err(QijiError::validation);
        }
        if let Some(args) = function_args(&lower, "hsla").or_else(|| function_args(&lower, "hsl")) {
            return parse_hsl_args(args).map_err(QijiError::validation);
        }
        Err(QijiError::validation(format!("unsupported color \"{s}\"")))
    }

    /// Convert to premultiplied RGBA8, clamping every channel.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }

    /// Convert to straight RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        let to_u8 = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .trim_end()
        .strip_suffix(')')
}

fn split_args(args: &str) -> Vec<&str> {
    args.split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_number(part: &str) -> Result<f64, String> {
    part.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid color component \"{part}\""))
}

fn parse_fraction(part: &str, scale: f64) -> Result<f64, String> {
    match part.strip_suffix('%') {
        Some(p) => Ok(parse_number(p)? / 100.0),
        None => Ok(parse_number(part)? / scale),
    }
}

fn parse_rgb_args(args: &str) -> Result<Color, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("rgb() takes 3 or 4 components".to_owned());
    }
    let r = parse_fraction(parts[0], 255.0)?;
    let g = parse_fraction(parts[1], 255.0)?;
    let b = parse_fraction(parts[2], 255.0)?;
    let a = match parts.get(3) {
        Some(p) => parse_fraction(p, 1.0)?,
        None => 1.0,
    };
    Ok(Color::rgba(
        r.clamp(0.0, 1.0),
        g.clamp(0.0, 1.0),
        b.clamp(0.0, 1.0),
        a.clamp(0.0, 1.0),
    ))
}

fn parse_hsl_args(args: &str) -> Result<Color, String> {
    let parts = split_args(args);
    if parts.len() != 3 && parts.len() != 4 {
        return Err("hsl() takes 3 or 4 components".to_owned());
    }
    let h = parse_number(parts[0].strip_suffix("deg").unwrap_or(parts[0]))?;
    let s = parse_fraction(parts[1], 100.0)?;
    let l = parse_fraction(parts[2], 100.0)?;
    let a = match parts.get(3) {
        Some(p) => parse_fraction(p, 1.0)?,
        None => 1.0,
    };
    Ok(hsla_to_rgba(h, s, l, a.clamp(0.0, 1.0)))
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"#{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    fn hex_nibble(c: &str) -> Result<u8, String> {
        let v = u8::from_str_radix(c, 16).map_err(|_| format!("invalid hex digit \"{c}\""))?;
        Ok(v * 17)
    }

    let (r, g, b, a) = match s.len() {
        3 => (
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
            255,
        ),
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA".to_owned());
        }
    };

    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

fn hsla_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Color {
    let h = (h % 360.0 + 360.0) % 360.0 / 360.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Color::rgba(l, l, l, a);
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Color::rgba(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
        a,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
