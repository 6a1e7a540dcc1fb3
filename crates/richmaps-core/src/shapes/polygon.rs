//! Polygon shape with fill and holes.

use super::polyline::{ring_path, stroke_ring};
use super::{FillStyle, Polyline, SerializableColor, Shader, ShapeId, ShapeStyle};
use crate::geo::GeoPoint;
use crate::map::Projection;
use crate::surface::{FillPaint, Surface};
use serde::{Deserialize, Serialize};

/// A polyline outline plus a filled interior with optional holes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) outline: Polyline,
    pub(crate) fill_style: FillStyle,
    pub(crate) fill_color: SerializableColor,
    /// Overrides `fill_color` when set.
    pub(crate) fill_shader: Option<Shader>,
    pub(crate) holes: Vec<Vec<GeoPoint>>,
}

impl Polygon {
    pub(crate) fn new(
        outline: Polyline,
        fill_style: FillStyle,
        fill_color: SerializableColor,
        fill_shader: Option<Shader>,
        holes: Vec<Vec<GeoPoint>>,
    ) -> Self {
        Self {
            outline,
            fill_style,
            fill_color,
            fill_shader,
            holes,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.outline.id()
    }

    pub fn z_index(&self) -> i32 {
        self.outline.z_index()
    }

    pub fn points(&self) -> &[GeoPoint] {
        self.outline.points()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.outline.style()
    }

    pub fn outline(&self) -> &Polyline {
        &self.outline
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    pub fn fill_color(&self) -> SerializableColor {
        self.fill_color
    }

    pub fn fill_shader(&self) -> Option<&Shader> {
        self.fill_shader.as_ref()
    }

    pub fn holes(&self) -> &[Vec<GeoPoint>] {
        &self.holes
    }

    /// Add a hole ring. Holes are erased from the fill in insertion order.
    pub fn add_hole(&mut self, hole: Vec<GeoPoint>) {
        self.holes.push(hole);
    }

    pub fn add_holes(&mut self, holes: impl IntoIterator<Item = Vec<GeoPoint>>) {
        self.holes.extend(holes);
    }

    /// Fill (then cut holes), then stroke the outer ring and every hole ring,
    /// according to the fill style.
    pub fn draw<S, P>(&mut self, surface: &mut S, projection: &P)
    where
        S: Surface + ?Sized,
        P: Projection + ?Sized,
    {
        if self.fill_style.fills() {
            self.draw_fill(surface, projection);
            for hole in &self.holes {
                let path = ring_path(hole, projection);
                if !path.elements().is_empty() {
                    surface.erase_path(&path, self.outline.style.antialias);
                }
            }
        }

        if self.fill_style.strokes() {
            let style = &self.outline.style;
            let closed = self.outline.closed;
            stroke_ring(&mut self.outline.points, style, closed, surface, projection);
            for hole in &mut self.holes {
                stroke_ring(hole, style, closed, surface, projection);
            }
        }
    }

    fn draw_fill<S, P>(&self, surface: &mut S, projection: &P)
    where
        S: Surface + ?Sized,
        P: Projection + ?Sized,
    {
        let path = ring_path(&self.outline.points, projection);
        if path.elements().is_empty() {
            return;
        }
        let shader = self
            .fill_shader
            .clone()
            .unwrap_or_else(|| Shader::Solid {
                color: self.fill_color,
            });
        let paint = FillPaint {
            shader,
            antialias: self.outline.style.antialias,
        };
        surface.fill_path(&path, &paint);
    }
}
