//! Shape definitions for rich map symbology.

mod options;
mod polygon;
mod polyline;

pub use options::{PolygonOptions, PolylineOptions, ShapeOptions};
pub use polygon::Polygon;
pub use polyline::Polyline;

use crate::geo::GeoPoint;
use crate::map::Projection;
use crate::surface::Surface;
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Geometry at the ends of open strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Geometry where stroke segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Which parts of a polygon are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStyle {
    Fill,
    Stroke,
    #[default]
    FillAndStroke,
}

impl FillStyle {
    pub fn fills(self) -> bool {
        matches!(self, FillStyle::Fill | FillStyle::FillAndStroke)
    }

    pub fn strokes(self) -> bool {
        matches!(self, FillStyle::Stroke | FillStyle::FillAndStroke)
    }
}

/// Dash pattern: alternating on/off lengths in pixels, starting `phase` pixels in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub intervals: Vec<f32>,
    #[serde(default)]
    pub phase: f32,
}

impl DashPattern {
    pub fn new(intervals: Vec<f32>, phase: f32) -> Self {
        Self { intervals, phase }
    }

    /// A pattern is usable when it has an even, non-zero number of
    /// non-negative intervals with a positive total length.
    pub fn is_valid(&self) -> bool {
        !self.intervals.is_empty()
            && self.intervals.len() % 2 == 0
            && self.intervals.iter().all(|i| i.is_finite() && *i >= 0.0)
            && self.intervals.iter().sum::<f32>() > 0.0
            && self.phase.is_finite()
    }
}

/// Gaussian blur applied to the stroke's coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurMask {
    /// Blur radius in pixels.
    pub radius: f32,
}

impl BlurMask {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Gaussian sigma equivalent to the radius.
    pub fn sigma(&self) -> f32 {
        if self.radius > 0.0 {
            self.radius * 0.57735 + 0.5
        } else {
            0.0
        }
    }
}

/// A gradient color stop at `offset` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: SerializableColor,
}

impl ColorStop {
    pub fn new(offset: f32, color: Color) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// Paint source for strokes and fills, in screen pixel coordinates.
///
/// Gradients pad with their end colors outside their range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shader {
    Solid { color: SerializableColor },
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<ColorStop>,
    },
    RadialGradient {
        center: Point,
        radius: f64,
        stops: Vec<ColorStop>,
    },
}

impl Shader {
    pub fn solid(color: Color) -> Self {
        Shader::Solid {
            color: color.into(),
        }
    }

    /// Two-stop linear gradient from `start_color` at `start` to `end_color` at `end`.
    pub fn linear(start: Point, end: Point, start_color: Color, end_color: Color) -> Self {
        Shader::LinearGradient {
            start,
            end,
            stops: vec![
                ColorStop::new(0.0, start_color),
                ColorStop::new(1.0, end_color),
            ],
        }
    }
}

/// Stroke style shared by every shape variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Stroke width in pixels (0 = hairline).
    pub stroke_width: f32,
    pub stroke_cap: LineCap,
    pub stroke_join: LineJoin,
    pub dash: Option<DashPattern>,
    pub blur: Option<BlurMask>,
    /// Overrides per-segment coloring when set.
    pub stroke_shader: Option<Shader>,
    /// Interpolate between endpoint colors along each segment.
    pub linear_gradient: bool,
    /// Default color for points without their own.
    pub stroke_color: SerializableColor,
    pub antialias: bool,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_width: 1.0,
            stroke_cap: LineCap::default(),
            stroke_join: LineJoin::default(),
            dash: None,
            blur: None,
            stroke_shader: None,
            linear_gradient: true,
            stroke_color: SerializableColor::black(),
            antialias: true,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A drawable map shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Polyline(Polyline),
    Polygon(Polygon),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Polyline(s) => s.id(),
            Shape::Polygon(s) => s.id(),
        }
    }

    /// Paint-order bucket of this shape.
    pub fn z_index(&self) -> i32 {
        match self {
            Shape::Polyline(s) => s.z_index(),
            Shape::Polygon(s) => s.z_index(),
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        match self {
            Shape::Polyline(s) => s.points(),
            Shape::Polygon(s) => s.points(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Polyline(s) => s.style(),
            Shape::Polygon(s) => s.style(),
        }
    }

    /// Rasterize this shape onto `surface`, compositing over its content.
    pub fn draw<S, P>(&mut self, surface: &mut S, projection: &P)
    where
        S: Surface + ?Sized,
        P: Projection + ?Sized,
    {
        log::trace!("drawing shape {} (z-index {})", self.id(), self.z_index());
        match self {
            Shape::Polyline(s) => s.draw(surface, projection),
            Shape::Polygon(s) => s.draw(surface, projection),
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            Shape::Polygon(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
