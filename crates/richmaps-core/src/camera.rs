//! Web-Mercator map camera.
//!
//! A self-contained implementation of the map collaborator traits: the world
//! is a square of `TILE_SIZE * 2^zoom` pixels, rotated by the camera bearing
//! around the viewport center.

use crate::geo::LatLng;
use crate::map::{CameraPosition, MapView, Projection, ScreenPoint, Viewport, VisibleRegion};
use kurbo::{Affine, Point, Size, Vec2};
use std::f64::consts::PI;

/// Size in pixels of the whole world at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web-Mercator square.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Camera over a Web-Mercator map shown in a viewport of fixed pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCamera {
    position: CameraPosition,
    viewport: Size,
}

impl MapCamera {
    pub fn new(position: CameraPosition, viewport: Size) -> Self {
        Self { position, viewport }
    }

    pub fn position(&self) -> CameraPosition {
        self.position
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Move the camera to a new target, zoom and bearing.
    pub fn move_camera(&mut self, position: CameraPosition) {
        self.position = position;
    }

    /// Change the viewport size in pixels.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// World size in pixels at the current zoom.
    pub fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.position.zoom as f64)
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world pixel coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        let target = project(self.position.target, self.world_size());
        let center = Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        Affine::translate(center)
            * Affine::rotate(-(self.position.bearing as f64).to_radians())
            * Affine::translate(-target.to_vec2())
    }

    /// Get the inverse transform for screen queries.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    /// Convert a coordinate to fractional screen pixels.
    pub fn geo_to_screen(&self, position: LatLng) -> Point {
        self.transform() * project(position, self.world_size())
    }

    /// Convert a screen pixel back to a coordinate.
    pub fn screen_to_geo(&self, screen: Point) -> LatLng {
        unproject(self.inverse_transform() * screen, self.world_size())
    }
}

/// Web-Mercator projection of a coordinate into a world of `world_size` pixels.
pub fn project(position: LatLng, world_size: f64) -> Point {
    let lat = position.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (position.longitude + 180.0) / 360.0 * world_size;
    let y = (0.5 - ((PI / 4.0 + lat / 2.0).tan()).ln() / (2.0 * PI)) * world_size;
    Point::new(x, y)
}

/// Inverse of [`project`].
pub fn unproject(world: Point, world_size: f64) -> LatLng {
    let longitude = world.x / world_size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * world.y / world_size;
    let latitude = n.sinh().atan().to_degrees();
    LatLng::new(latitude, longitude)
}

impl Projection for MapCamera {
    fn to_screen_location(&self, position: LatLng) -> ScreenPoint {
        let p = self.geo_to_screen(position);
        ScreenPoint::new(p.x.round() as i32, p.y.round() as i32)
    }

    fn visible_region(&self) -> VisibleRegion {
        let (w, h) = (self.viewport.width, self.viewport.height);
        VisibleRegion::from_corners(
            self.screen_to_geo(Point::new(0.0, h)),
            self.screen_to_geo(Point::new(w, h)),
            self.screen_to_geo(Point::new(0.0, 0.0)),
            self.screen_to_geo(Point::new(w, 0.0)),
        )
    }
}

impl MapView for MapCamera {
    type Projection = MapCamera;

    fn camera_position(&self) -> CameraPosition {
        self.position
    }

    fn projection(&self) -> MapCamera {
        self.clone()
    }
}

impl Viewport for MapCamera {
    fn width(&self) -> u32 {
        Viewport::width(&self.viewport)
    }

    fn height(&self) -> u32 {
        Viewport::height(&self.viewport)
    }
}
