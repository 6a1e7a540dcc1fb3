//! tiny-skia backed [`Surface`].

use crate::blur::{blur_margin, gaussian_blur};
use crate::paint;
use kurbo::{BezPath, Point};
use richmaps_core::shapes::SerializableColor;
use richmaps_core::{FillPaint, StrokePaint, Surface, SurfaceError};
use tiny_skia::{BlendMode, FillRule, Paint, Pixmap, PixmapPaint, Transform};

/// An RGBA pixmap surface rasterized on the CPU.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha color of the pixel at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<SerializableColor> {
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(SerializableColor::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Row-major straight-alpha RGBA8 bytes, as image encoders expect them.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Stroke through a scratch pixmap covering the segment, blur it, then
    /// composite the result back.
    fn stroke_blurred(
        &mut self,
        path: &tiny_skia::Path,
        paint: &Paint<'_>,
        stroke: &tiny_skia::Stroke,
        sigma: f32,
    ) {
        // Caps and joins reach past the centerline, so size from the stroked outline.
        let (bounds, reach) = match path.stroke(stroke, 1.0) {
            Some(outline) => (outline.bounds(), 0.0),
            None => (path.bounds(), stroke.width * std::f32::consts::SQRT_2 / 2.0),
        };
        let pad = reach + blur_margin(sigma) + 1.0;
        let left = ((bounds.left() - pad).floor().max(0.0)) as i32;
        let top = ((bounds.top() - pad).floor().max(0.0)) as i32;
        let right = ((bounds.right() + pad).ceil() as i32).min(self.pixmap.width() as i32);
        let bottom = ((bounds.bottom() + pad).ceil() as i32).min(self.pixmap.height() as i32);
        if right <= left || bottom <= top {
            return;
        }

        let Some(mut scratch) = Pixmap::new((right - left) as u32, (bottom - top) as u32) else {
            return;
        };
        scratch.stroke_path(
            path,
            paint,
            stroke,
            Transform::from_translate(-left as f32, -top as f32),
            None,
        );
        if let Err(err) = gaussian_blur(&mut scratch, sigma) {
            log::warn!("blur failed, drawing unblurred stroke: {err}");
        }
        self.pixmap.draw_pixmap(
            left,
            top,
            scratch.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }
}

impl Surface for PixmapSurface {
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::new(width, height)
    }

    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke_paint: &StrokePaint) {
        let Some(path) = paint::line(from, to) else {
            return;
        };
        let paint = Paint {
            shader: paint::shader(&stroke_paint.shader),
            anti_alias: stroke_paint.antialias,
            ..Paint::default()
        };
        let stroke = paint::stroke(stroke_paint);

        match stroke_paint.blur.map(|b| b.sigma()) {
            Some(sigma) if sigma > 0.0 => self.stroke_blurred(&path, &paint, &stroke, sigma),
            _ => self
                .pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None),
        }
    }

    fn fill_path(&mut self, path: &BezPath, fill_paint: &FillPaint) {
        let Some(path) = paint::path(path) else {
            return;
        };
        let paint = Paint {
            shader: paint::shader(&fill_paint.shader),
            anti_alias: fill_paint.antialias,
            ..Paint::default()
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn erase_path(&mut self, path: &BezPath, antialias: bool) {
        let Some(path) = paint::path(path) else {
            return;
        };
        let paint = Paint {
            shader: tiny_skia::Shader::SolidColor(tiny_skia::Color::TRANSPARENT),
            blend_mode: BlendMode::DestinationIn,
            anti_alias: antialias,
            ..Paint::default()
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}
