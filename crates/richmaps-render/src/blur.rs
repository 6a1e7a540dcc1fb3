//! Gaussian blur of premultiplied pixmaps.

use image::{ImageBuffer, Rgba};
use richmaps_core::SurfaceError;
use tiny_skia::Pixmap;

/// Blur `pixmap` in place with a gaussian of standard deviation `sigma`.
///
/// Premultiplied channels blur independently, so every color channel stays
/// at or below alpha afterwards.
pub(crate) fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) -> Result<(), SurfaceError> {
    if sigma <= 0.0 {
        return Ok(());
    }

    let (width, height) = (pixmap.width(), pixmap.height());
    let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, pixmap.data().to_vec()).ok_or_else(|| {
            SurfaceError::Backend(format!("pixel buffer does not match {width}x{height}"))
        })?;

    let blurred = image::imageops::blur(&buffer, sigma);
    let data = pixmap.data_mut();
    data.copy_from_slice(blurred.as_raw());
    for px in data.chunks_exact_mut(4) {
        let alpha = px[3];
        px[0] = px[0].min(alpha);
        px[1] = px[1].min(alpha);
        px[2] = px[2].min(alpha);
    }
    Ok(())
}

/// Padding in pixels that holds the visible part of a blur.
pub(crate) fn blur_margin(sigma: f32) -> f32 {
    (sigma * 3.0).ceil()
}
