//! Still-frame export.

use std::path::Path;

use crate::foundation::error::{QijiError, QijiResult};
use crate::render::backend::FrameRGBA;

fn checked_straight_rgba(frame: &FrameRGBA) -> QijiResult<Vec<u8>> {
    if frame.is_empty() {
        return Err(QijiError::render("cannot export an empty frame"));
    }
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(QijiError::render(format!(
            "frame data is {} bytes, expected {expected}",
            frame.data.len()
        )));
    }
    Ok(frame.to_straight_rgba8())
}

/// Encode `frame` as PNG bytes (straight alpha).
pub fn encode_png(frame: &FrameRGBA) -> QijiResult<Vec<u8>> {
    use image::ImageEncoder;

    let rgba = checked_straight_rgba(frame)?;
    let mut png_bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut png_bytes)
        .write_image(
            &rgba,
            frame.width,
            frame.height,
            image::ColorType::Rgba8.into(),
        )
        .map_err(|e| QijiError::render(format!("png encoding failed: {e}")))?;
    Ok(png_bytes)
}

/// Write `frame` to `path` as PNG, creating parent directories.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn write_png(frame: &FrameRGBA, path: &Path) -> QijiResult<()> {
    let rgba = checked_straight_rgba(frame)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            QijiError::render(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| QijiError::render(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
