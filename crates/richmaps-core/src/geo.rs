//! Geographic primitives: coordinates, bounds and colored points.

use crate::shapes::SerializableColor;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Mean earth radius in meters, as used by the map SDK's spherical utilities.
pub const EARTH_RADIUS: f64 = 6_371_009.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    /// Create a coordinate. Latitude is clamped to [-90, 90] and longitude
    /// wrapped into [-180, 180).
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let longitude = if (-180.0..180.0).contains(&longitude) {
            longitude
        } else {
            ((longitude - 180.0) % 360.0 + 360.0) % 360.0 - 180.0
        };
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude,
        }
    }
}

/// Axis-aligned geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

impl LatLngBounds {
    /// Smallest bounds containing every coordinate, or `None` for an empty input.
    ///
    /// Longitudes are not wrapped across the antimeridian.
    pub fn from_points(points: impl IntoIterator<Item = LatLng>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            southwest: first,
            northeast: first,
        };
        for p in iter {
            bounds.southwest.latitude = bounds.southwest.latitude.min(p.latitude);
            bounds.southwest.longitude = bounds.southwest.longitude.min(p.longitude);
            bounds.northeast.latitude = bounds.northeast.latitude.max(p.latitude);
            bounds.northeast.longitude = bounds.northeast.longitude.max(p.longitude);
        }
        Some(bounds)
    }

    /// Check whether a coordinate lies inside the bounds (inclusive).
    pub fn contains(&self, point: LatLng) -> bool {
        point.latitude >= self.southwest.latitude
            && point.latitude <= self.northeast.latitude
            && point.longitude >= self.southwest.longitude
            && point.longitude <= self.northeast.longitude
    }
}

/// A vertex of a shape: an optional position with an optional color.
///
/// A point with no position is skipped when drawing and breaks segment
/// adjacency. A point with no color picks up the owning shape's stroke
/// color the first time its stroke is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub position: Option<LatLng>,
    #[serde(default)]
    pub color: Option<SerializableColor>,
}

impl GeoPoint {
    /// Create an uncolored point.
    pub fn new(position: LatLng) -> Self {
        Self {
            position: Some(position),
            color: None,
        }
    }

    /// Create a point with its own color.
    pub fn with_color(position: LatLng, color: Color) -> Self {
        Self {
            position: Some(position),
            color: Some(color.into()),
        }
    }

    /// A placeholder vertex with no position.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<LatLng> {
        self.position
    }

    pub fn color(&self) -> Option<Color> {
        self.color.map(Into::into)
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color.into());
    }
}

impl From<LatLng> for GeoPoint {
    fn from(position: LatLng) -> Self {
        Self::new(position)
    }
}

/// Great-circle distance between two coordinates in meters (haversine).
pub fn compute_distance_between(from: LatLng, to: LatLng) -> f64 {
    compute_angle_between(from, to) * EARTH_RADIUS
}

/// Central angle between two coordinates in radians.
fn compute_angle_between(from: LatLng, to: LatLng) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat1 - lat2;
    let dlng = (from.longitude - to.longitude).to_radians();
    let hav = hav(dlat) + hav(dlng) * lat1.cos() * lat2.cos();
    2.0 * hav.clamp(0.0, 1.0).sqrt().asin()
}

fn hav(x: f64) -> f64 {
    let s = (x * 0.5).sin();
    s * s
}
