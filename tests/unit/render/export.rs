use super::*;

fn frame(px: [u8; 4], w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: px.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn encodes_png_signature_and_unpremultiplies() {
    let bytes = encode_png(&frame([64, 0, 0, 128], 3, 2)).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(1, 1).0, [128, 0, 0, 128]);
}

#[test]
fn rejects_empty_and_short_frames() {
    assert!(matches!(
        encode_png(&FrameRGBA::empty()),
        Err(QijiError::Render(_))
    ));
    let mut f = frame([0, 0, 0, 255], 2, 2);
    f.data.pop();
    assert!(encode_png(&f).is_err());
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("qiji-export-{}", std::process::id()));
    let path = dir.join("nested").join("card.png");
    write_png(&frame([255, 255, 255, 255], 4, 4), &path).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}
