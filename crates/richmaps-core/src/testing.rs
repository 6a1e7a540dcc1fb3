//! Test doubles for the draw pipeline.

use crate::geo::LatLng;
use crate::map::{Projection, ScreenPoint, VisibleRegion};
use crate::surface::{FillPaint, StrokePaint, Surface, SurfaceError};
use kurbo::{BezPath, Point};

/// Maps longitude to x and latitude to y, one pixel per degree.
pub struct PlanarProjection;

impl Projection for PlanarProjection {
    fn to_screen_location(&self, position: LatLng) -> ScreenPoint {
        ScreenPoint::new(position.longitude.round() as i32, position.latitude.round() as i32)
    }

    fn visible_region(&self) -> VisibleRegion {
        VisibleRegion::from_corners(
            LatLng::new(80.0, 0.0),
            LatLng::new(80.0, 100.0),
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 100.0),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear,
    Stroke { from: Point, to: Point, paint: StrokePaint },
    Fill { path: BezPath, paint: FillPaint },
    Erase { path: BezPath },
}

/// Records every draw call instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<Command>,
}

impl RecordingSurface {
    pub fn strokes(&self) -> Vec<(Point, Point, &StrokePaint)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Stroke { from, to, paint } => Some((*from, *to, paint)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            commands: Vec::new(),
        })
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(Command::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, paint: &StrokePaint) {
        self.commands.push(Command::Stroke {
            from,
            to,
            paint: paint.clone(),
        });
    }

    fn fill_path(&mut self, path: &BezPath, paint: &FillPaint) {
        self.commands.push(Command::Fill {
            path: path.clone(),
            paint: paint.clone(),
        });
    }

    fn erase_path(&mut self, path: &BezPath, _antialias: bool) {
        self.commands.push(Command::Erase { path: path.clone() });
    }
}
