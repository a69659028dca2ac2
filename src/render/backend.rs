/// A rendered frame as RGBA8 pixels.
///
/// Frames from [`crate::CpuBackend`] are **premultiplied alpha**. The `premultiplied` flag keeps
/// that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A 0x0 frame.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
            premultiplied: true,
        }
    }

    /// `true` for a frame without pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA of pixel `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
