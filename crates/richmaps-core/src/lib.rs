//! RichMaps Core Library
//!
//! Geographic shape model and the layer pipeline that rasterizes z-ordered
//! polylines and polygons into a single ground overlay.

pub mod camera;
pub mod geo;
pub mod layer;
pub mod map;
pub mod shapes;
pub mod surface;

#[cfg(test)]
mod testing;

pub use camera::MapCamera;
pub use geo::{GeoPoint, LatLng, LatLngBounds, compute_distance_between};
pub use layer::{LayerBuilder, LayerConfig, LayerError, LayerResult, LayerState, RichLayer};
pub use map::{
    CameraPosition, MapView, OverlayHandle, OverlayHost, OverlayPlacement, Projection, ScreenPoint,
    Viewport, VisibleRegion,
};
pub use shapes::{
    FillStyle, LineCap, LineJoin, PolygonOptions, PolylineOptions, Shader, Shape, ShapeId,
    ShapeOptions, ShapeStyle,
};
pub use surface::{FillPaint, StrokePaint, Surface, SurfaceError};
