//! Builders for polylines and polygons.
//!
//! Every option has a default, so a builder (or a scene file entry) only
//! needs to name what it changes.

use super::{
    BlurMask, DashPattern, FillStyle, LineCap, LineJoin, Polygon, Polyline, SerializableColor,
    Shader, Shape, ShapeStyle,
};
use crate::geo::GeoPoint;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Builder for [`Polyline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolylineOptions {
    pub points: Vec<GeoPoint>,
    pub z_index: i32,
    pub closed: bool,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Default for PolylineOptions {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            z_index: 0,
            closed: false,
            style: ShapeStyle::default(),
        }
    }
}

impl PolylineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, point: GeoPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn add_all(mut self, points: impl IntoIterator<Item = GeoPoint>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.style.stroke_width = width;
        self
    }

    pub fn stroke_cap(mut self, cap: LineCap) -> Self {
        self.style.stroke_cap = cap;
        self
    }

    pub fn stroke_join(mut self, join: LineJoin) -> Self {
        self.style.stroke_join = join;
        self
    }

    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.style.dash = Some(dash);
        self
    }

    pub fn blur(mut self, blur: BlurMask) -> Self {
        self.style.blur = Some(blur);
        self
    }

    pub fn linear_gradient(mut self, enabled: bool) -> Self {
        self.style.linear_gradient = enabled;
        self
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.style.stroke_color = color.into();
        self
    }

    pub fn antialias(mut self, antialias: bool) -> Self {
        self.style.antialias = antialias;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn stroke_shader(mut self, shader: Shader) -> Self {
        self.style.stroke_shader = Some(shader);
        self
    }

    pub fn build(self) -> Polyline {
        Polyline::new(self.z_index, self.points, self.closed, self.style)
    }
}

/// Builder for [`Polygon`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonOptions {
    pub points: Vec<GeoPoint>,
    pub holes: Vec<Vec<GeoPoint>>,
    pub z_index: i32,
    pub closed: bool,
    #[serde(flatten)]
    pub style: ShapeStyle,
    pub fill_shader: Option<Shader>,
    pub fill_style: FillStyle,
    pub fill_color: SerializableColor,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            holes: Vec::new(),
            z_index: 0,
            closed: true,
            style: ShapeStyle::default(),
            fill_shader: None,
            fill_style: FillStyle::default(),
            fill_color: SerializableColor::white(),
        }
    }
}

impl PolygonOptions {
    /// Start a polygon from its outer ring.
    pub fn new(points: impl IntoIterator<Item = GeoPoint>) -> Self {
        Self::default().add_all(points)
    }

    pub fn add(mut self, point: GeoPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn add_all(mut self, points: impl IntoIterator<Item = GeoPoint>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn add_hole(mut self, hole: Vec<GeoPoint>) -> Self {
        self.holes.push(hole);
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn stroke_width(mut self, width: f32) -> Self {
        self.style.stroke_width = width;
        self
    }

    pub fn stroke_cap(mut self, cap: LineCap) -> Self {
        self.style.stroke_cap = cap;
        self
    }

    pub fn stroke_join(mut self, join: LineJoin) -> Self {
        self.style.stroke_join = join;
        self
    }

    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.style.dash = Some(dash);
        self
    }

    pub fn blur(mut self, blur: BlurMask) -> Self {
        self.style.blur = Some(blur);
        self
    }

    pub fn linear_gradient(mut self, enabled: bool) -> Self {
        self.style.linear_gradient = enabled;
        self
    }

    pub fn stroke_color(mut self, color: Color) -> Self {
        self.style.stroke_color = color.into();
        self
    }

    pub fn antialias(mut self, antialias: bool) -> Self {
        self.style.antialias = antialias;
        self
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn stroke_shader(mut self, shader: Shader) -> Self {
        self.style.stroke_shader = Some(shader);
        self
    }

    pub fn fill_shader(mut self, shader: Shader) -> Self {
        self.fill_shader = Some(shader);
        self
    }

    pub fn fill_style(mut self, style: FillStyle) -> Self {
        self.fill_style = style;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color.into();
        self
    }

    pub fn build(self) -> Polygon {
        let outline = Polyline::new(self.z_index, self.points, self.closed, self.style);
        Polygon::new(
            outline,
            self.fill_style,
            self.fill_color,
            self.fill_shader,
            self.holes,
        )
    }
}

/// Options for either shape variant, tagged by `"type"` in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeOptions {
    Polyline(PolylineOptions),
    Polygon(PolygonOptions),
}

impl ShapeOptions {
    pub fn build(self) -> Shape {
        match self {
            ShapeOptions::Polyline(o) => Shape::Polyline(o.build()),
            ShapeOptions::Polygon(o) => Shape::Polygon(o.build()),
        }
    }
}
