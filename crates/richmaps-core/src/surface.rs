//! Raster surface abstraction.
//!
//! Shapes emit draw commands against a [`Surface`]; backends decide how
//! those commands become pixels.

use crate::shapes::{BlurMask, DashPattern, LineCap, LineJoin, Shader, ShapeStyle};
use kurbo::{BezPath, Point};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Paint for a single stroked segment.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePaint {
    pub shader: Shader,
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub dash: Option<DashPattern>,
    pub blur: Option<BlurMask>,
    pub antialias: bool,
}

impl StrokePaint {
    /// Stroke paint carrying the shape-wide parameters of `style`.
    pub fn from_style(style: &ShapeStyle, shader: Shader) -> Self {
        Self {
            shader,
            width: style.stroke_width,
            cap: style.stroke_cap,
            join: style.stroke_join,
            dash: style.dash.clone(),
            blur: style.blur,
            antialias: style.antialias,
        }
    }
}

/// Paint for a filled region.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPaint {
    pub shader: Shader,
    pub antialias: bool,
}

/// A drawable image in screen pixel space.
///
/// All operations composite source-over unless noted, and touch only the
/// pixels covered by the geometry.
pub trait Surface {
    /// Allocate a transparent surface of the given pixel size.
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError>
    where
        Self: Sized;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    /// Stroke a straight segment.
    fn stroke_line(&mut self, from: Point, to: Point, paint: &StrokePaint);

    /// Fill a closed path with the non-zero rule.
    fn fill_path(&mut self, path: &BezPath, paint: &FillPaint);

    /// Erase the area covered by `path` (destination-in with a fully
    /// transparent source).
    fn erase_path(&mut self, path: &BezPath, antialias: bool);
}
