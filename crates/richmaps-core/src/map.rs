//! Interfaces to the host map: camera, projection, viewport and overlays.
//!
//! The layer pipeline only talks to the map through these traits, so any
//! map widget (or a headless stand-in) can host a [`RichLayer`](crate::RichLayer).

use crate::geo::{LatLng, LatLngBounds};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Camera state of the host map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    /// Coordinate at the center of the viewport.
    pub target: LatLng,
    pub zoom: f32,
    /// Degrees clockwise from north.
    #[serde(default)]
    pub bearing: f32,
}

impl CameraPosition {
    pub fn new(target: LatLng, zoom: f32) -> Self {
        Self {
            target,
            zoom,
            bearing: 0.0,
        }
    }

    pub fn with_bearing(mut self, bearing: f32) -> Self {
        self.bearing = bearing;
        self
    }
}

/// Integer pixel location relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<ScreenPoint> for Point {
    fn from(p: ScreenPoint) -> Self {
        Point::new(p.x as f64, p.y as f64)
    }
}

/// The four geographic corners of the viewport and their bounding box.
///
/// "Near" is the bottom edge of the screen, "far" the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleRegion {
    pub near_left: LatLng,
    pub near_right: LatLng,
    pub far_left: LatLng,
    pub far_right: LatLng,
    pub lat_lng_bounds: LatLngBounds,
}

impl VisibleRegion {
    pub fn from_corners(
        near_left: LatLng,
        near_right: LatLng,
        far_left: LatLng,
        far_right: LatLng,
    ) -> Self {
        let lat_lng_bounds = LatLngBounds::from_points([near_left, near_right, far_left, far_right])
            .unwrap_or(LatLngBounds {
                southwest: near_left,
                northeast: far_right,
            });
        Self {
            near_left,
            near_right,
            far_left,
            far_right,
            lat_lng_bounds,
        }
    }
}

/// Mapping between geographic coordinates and screen pixels.
pub trait Projection {
    fn to_screen_location(&self, position: LatLng) -> ScreenPoint;

    fn visible_region(&self) -> VisibleRegion;
}

/// Camera access on the host map.
pub trait MapView {
    type Projection: Projection;

    fn camera_position(&self) -> CameraPosition;

    /// Snapshot of the projection for the current camera.
    fn projection(&self) -> Self::Projection;
}

/// Pixel size of the view the map is displayed in.
pub trait Viewport {
    fn width(&self) -> u32;

    fn height(&self) -> u32;
}

impl Viewport for Size {
    fn width(&self) -> u32 {
        self.width.max(0.0).round() as u32
    }

    fn height(&self) -> u32 {
        self.height.max(0.0).round() as u32
    }
}

impl Viewport for (u32, u32) {
    fn width(&self) -> u32 {
        self.0
    }

    fn height(&self) -> u32 {
        self.1
    }
}

/// Handle to an overlay published on the host map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(pub u64);

/// Where a ground overlay sits on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    /// Anchor coordinate (the image center).
    pub position: LatLng,
    /// Real-world width of the image in meters; height follows the image aspect ratio.
    pub width_meters: f64,
    /// Degrees clockwise from north.
    pub bearing: f32,
}

/// Ground overlay management on the host map.
pub trait OverlayHost<S> {
    fn add_ground_overlay(
        &mut self,
        image: &S,
        placement: &OverlayPlacement,
        z_index: f32,
    ) -> OverlayHandle;

    /// Replace the image and placement of an existing overlay in place.
    fn update_ground_overlay(&mut self, handle: OverlayHandle, image: &S, placement: &OverlayPlacement);

    fn remove_ground_overlay(&mut self, handle: OverlayHandle);
}
