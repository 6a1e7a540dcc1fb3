//! Polyline shape.

use super::{Shader, ShapeId, ShapeStyle};
use crate::geo::GeoPoint;
use crate::map::Projection;
use crate::surface::{StrokePaint, Surface};
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An open or closed stroked path through geographic points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub(crate) id: ShapeId,
    pub(crate) z_index: i32,
    pub(crate) points: Vec<GeoPoint>,
    /// Join the last point back to the first.
    pub(crate) closed: bool,
    pub(crate) style: ShapeStyle,
}

impl Polyline {
    pub(crate) fn new(z_index: i32, points: Vec<GeoPoint>, closed: bool, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            z_index,
            points,
            closed,
            style,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Stroke every segment of this polyline onto `surface`.
    pub fn draw<S, P>(&mut self, surface: &mut S, projection: &P)
    where
        S: Surface + ?Sized,
        P: Projection + ?Sized,
    {
        stroke_ring(&mut self.points, &self.style, self.closed, surface, projection);
    }
}

/// Stroke the segments between consecutive positioned points.
///
/// A point without a position breaks the chain. Points without a color get
/// the style's stroke color. Returns the number of segments drawn.
pub(crate) fn stroke_ring<S, P>(
    points: &mut [GeoPoint],
    style: &ShapeStyle,
    closed: bool,
    surface: &mut S,
    projection: &P,
) -> usize
where
    S: Surface + ?Sized,
    P: Projection + ?Sized,
{
    let mut first: Option<usize> = None;
    let mut last: Option<usize> = None;
    let mut previous: Option<usize> = None;
    let mut drawn = 0;

    for i in 0..points.len() {
        if points[i].position.is_none() {
            previous = None;
            continue;
        }
        if points[i].color.is_none() {
            points[i].color = Some(style.stroke_color);
        }
        if first.is_none() {
            first = Some(i);
        }
        if let Some(prev) = previous {
            if draw_segment(&points[prev], &points[i], style, surface, projection) {
                drawn += 1;
            }
        }
        previous = Some(i);
        last = Some(i);
    }

    if closed {
        if let (Some(first), Some(last)) = (first, last) {
            if first != last && draw_segment(&points[last], &points[first], style, surface, projection)
            {
                drawn += 1;
            }
        }
    }

    drawn
}

fn draw_segment<S, P>(
    from: &GeoPoint,
    to: &GeoPoint,
    style: &ShapeStyle,
    surface: &mut S,
    projection: &P,
) -> bool
where
    S: Surface + ?Sized,
    P: Projection + ?Sized,
{
    let (Some(from_pos), Some(to_pos)) = (from.position, to.position) else {
        return false;
    };
    let start: Point = projection.to_screen_location(from_pos).into();
    let end: Point = projection.to_screen_location(to_pos).into();

    let from_color = from.color().unwrap_or_else(|| style.stroke());
    let to_color = to.color().unwrap_or_else(|| style.stroke());

    let shader = if let Some(shader) = &style.stroke_shader {
        shader.clone()
    } else if style.linear_gradient {
        Shader::linear(start, end, from_color, to_color)
    } else {
        Shader::solid(from_color)
    };

    surface.stroke_line(start, end, &StrokePaint::from_style(style, shader));
    true
}

/// Closed screen-space path through every positioned point.
pub(crate) fn ring_path<P>(points: &[GeoPoint], projection: &P) -> BezPath
where
    P: Projection + ?Sized,
{
    let mut path = BezPath::new();
    let mut started = false;
    for position in points.iter().filter_map(|p| p.position) {
        let screen: Point = projection.to_screen_location(position).into();
        if started {
            path.line_to(screen);
        } else {
            path.move_to(screen);
            started = true;
        }
    }
    if started {
        path.close_path();
    }
    path
}
