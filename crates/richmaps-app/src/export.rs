//! PNG export of published overlays.

use crate::error::AppResult;
use crate::headless::PublishedOverlay;
use std::path::Path;

/// Encode straight-alpha RGBA8 pixels as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> AppResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(png_data)
}

/// Write an overlay image to `path`.
pub fn write_overlay_png(overlay: &PublishedOverlay, path: impl AsRef<Path>) -> AppResult<()> {
    let png_data = encode_png(&overlay.rgba, overlay.width, overlay.height)?;
    std::fs::write(path.as_ref(), &png_data)?;
    log::info!(
        "wrote {}x{} overlay to {} ({} bytes)",
        overlay.width,
        overlay.height,
        path.as_ref().display(),
        png_data.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let data = encode_png(&[255, 0, 0, 255, 0, 0, 255, 128], 2, 1).unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        assert!(encode_png(&[0; 7], 2, 1).is_err());
    }

    #[test]
    fn test_write_overlay_png_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.png");
        let overlay = PublishedOverlay {
            placement: richmaps_core::OverlayPlacement {
                position: richmaps_core::LatLng::new(0.0, 0.0),
                width_meters: 100.0,
                bearing: 0.0,
            },
            z_index: 0.0,
            width: 3,
            height: 2,
            rgba: vec![200; 3 * 2 * 4],
        };
        write_overlay_png(&overlay, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, encode_png(&overlay.rgba, 3, 2).unwrap());
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("overlay.png");
        let overlay = PublishedOverlay {
            placement: richmaps_core::OverlayPlacement {
                position: richmaps_core::LatLng::new(0.0, 0.0),
                width_meters: 1.0,
                bearing: 0.0,
            },
            z_index: 0.0,
            width: 1,
            height: 1,
            rgba: vec![0; 4],
        };
        assert!(matches!(
            write_overlay_png(&overlay, &path),
            Err(crate::error::AppError::Io(_))
        ));
    }

    #[test]
    fn test_decoded_pixels_match() {
        let rgba = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 1, 2, 3, 4];
        let data = encode_png(&rgba, 2, 2).unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(data));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(&buf[..info.buffer_size()], &rgba);
    }
}
