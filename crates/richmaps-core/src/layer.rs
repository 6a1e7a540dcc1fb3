//! Rich layer: z-ordered shapes rasterized into one ground overlay.

use crate::geo::compute_distance_between;
use crate::map::{MapView, OverlayHandle, OverlayHost, OverlayPlacement, Projection, Viewport};
use crate::shapes::{Shape, ShapeId};
use crate::surface::{Surface, SurfaceError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Overlays are withdrawn below this zoom level by default.
pub const MINIMUM_ZOOM_LEVEL: f32 = 5.0;

/// Layer errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayerError {
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Result type for layer operations.
pub type LayerResult<T> = Result<T, LayerError>;

/// Layer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Stacking order of the overlay relative to other map overlays.
    pub z_index: f32,
    /// Zoom level below which no overlay is shown.
    pub min_zoom_level: f32,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            z_index: 0.0,
            min_zoom_level: MINIMUM_ZOOM_LEVEL,
        }
    }
}

/// Whether the layer currently has an overlay on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    NoOverlay,
    OverlayActive,
}

/// A map layer drawn with rich symbology and shown as one ground overlay.
///
/// Shapes are painted by ascending z-index, and in insertion order within
/// the same z-index, so later shapes cover earlier ones.
pub struct RichLayer<V, M, S>
where
    V: Viewport,
    M: MapView + OverlayHost<S>,
    S: Surface,
{
    view: V,
    map: M,
    config: LayerConfig,
    shapes: BTreeMap<i32, Vec<Shape>>,
    overlay: Option<OverlayHandle>,
    surface: Option<S>,
}

impl<V, M, S> RichLayer<V, M, S>
where
    V: Viewport,
    M: MapView + OverlayHost<S>,
    S: Surface,
{
    /// Start building a layer.
    pub fn builder() -> LayerBuilder<V, M> {
        LayerBuilder::new()
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view, e.g. to resize it.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Mutable access to the map, e.g. to move its camera.
    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Add a shape to the end of its z-index bucket.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ShapeId {
        let shape = shape.into();
        let id = shape.id();
        self.shapes.entry(shape.z_index()).or_default().push(shape);
        id
    }

    /// Remove a shape by id from whichever bucket holds it.
    ///
    /// Returns `None` when the shape is not in this layer.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let mut removed = None;
        self.shapes.retain(|_, bucket| {
            if let Some(pos) = bucket.iter().position(|s| s.id() == id) {
                removed = Some(bucket.remove(pos));
            }
            !bucket.is_empty()
        });
        removed
    }

    /// Check if a shape is in this layer.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shape(id).is_some()
    }

    /// Get a shape by id.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.values().flatten().find(|s| s.id() == id)
    }

    /// Mutable access to a shape, e.g. to add holes to a polygon before the next refresh.
    ///
    /// The z-index cannot change through this handle, so the shape stays in its bucket.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.values_mut().flatten().find(|s| s.id() == id)
    }

    /// Ids of every shape, in paint order.
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.shapes.values().flatten().map(Shape::id).collect()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.values().all(Vec::is_empty)
    }

    pub fn state(&self) -> LayerState {
        if self.overlay.is_some() {
            LayerState::OverlayActive
        } else {
            LayerState::NoOverlay
        }
    }

    /// Handle of the overlay currently on the map.
    pub fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay
    }

    /// The backing image from the last refresh that built one.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Redraw every shape for the current camera and republish the overlay.
    ///
    /// Below the minimum zoom level the overlay is withdrawn instead.
    pub fn refresh(&mut self) -> LayerResult<()> {
        let camera = self.map.camera_position();
        if camera.zoom < self.config.min_zoom_level {
            log::debug!(
                "zoom {} below minimum {}, withdrawing overlay",
                camera.zoom,
                self.config.min_zoom_level
            );
            self.withdraw_overlay();
            return Ok(());
        }

        let projection = self.map.projection();
        self.prepare_surface()?;
        let Some(surface) = self.surface.as_mut() else {
            return Ok(());
        };

        for bucket in self.shapes.values_mut() {
            for shape in bucket.iter_mut() {
                shape.draw(surface, &projection);
            }
        }

        let region = projection.visible_region();
        let placement = OverlayPlacement {
            position: camera.target,
            width_meters: compute_distance_between(region.near_left, region.near_right),
            bearing: camera.bearing,
        };

        match self.overlay {
            Some(handle) => self.map.update_ground_overlay(handle, surface, &placement),
            None => {
                let handle = self.map.add_ground_overlay(surface, &placement, self.config.z_index);
                log::debug!("published overlay {:?}", handle);
                self.overlay = Some(handle);
            }
        }
        Ok(())
    }

    /// Reuse the backing image when the view size is unchanged, otherwise reallocate.
    fn prepare_surface(&mut self) -> LayerResult<()> {
        let (width, height) = (self.view.width(), self.view.height());
        let reusable = self
            .surface
            .as_ref()
            .is_some_and(|s| s.width() == width && s.height() == height);
        if reusable {
            if let Some(surface) = self.surface.as_mut() {
                surface.clear();
            }
        } else {
            log::debug!("allocating {}x{} layer surface", width, height);
            self.surface = None;
            self.surface = Some(S::allocate(width, height)?);
        }
        Ok(())
    }

    fn withdraw_overlay(&mut self) {
        if let Some(handle) = self.overlay.take() {
            self.map.remove_ground_overlay(handle);
        }
    }
}

impl<V, M, S> Drop for RichLayer<V, M, S>
where
    V: Viewport,
    M: MapView + OverlayHost<S>,
    S: Surface,
{
    fn drop(&mut self) {
        self.withdraw_overlay();
    }
}

/// Builder for [`RichLayer`].
pub struct LayerBuilder<V, M> {
    view: Option<V>,
    map: Option<M>,
    config: LayerConfig,
}

impl<V, M> Default for LayerBuilder<V, M> {
    fn default() -> Self {
        Self {
            view: None,
            map: None,
            config: LayerConfig::default(),
        }
    }
}

impl<V, M> LayerBuilder<V, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    pub fn map(mut self, map: M) -> Self {
        self.map = Some(map);
        self
    }

    pub fn z_index(mut self, z_index: f32) -> Self {
        self.config.z_index = z_index;
        self
    }

    pub fn min_zoom_level(mut self, zoom: f32) -> Self {
        self.config.min_zoom_level = zoom;
        self
    }

    pub fn config(mut self, config: LayerConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the layer. Fails if the view or the map was not provided.
    pub fn build<S>(self) -> LayerResult<RichLayer<V, M, S>>
    where
        V: Viewport,
        M: MapView + OverlayHost<S>,
        S: Surface,
    {
        let view = self.view.ok_or(LayerError::MissingCollaborator("view"))?;
        let map = self.map.ok_or(LayerError::MissingCollaborator("map"))?;
        Ok(RichLayer {
            view,
            map,
            config: self.config,
            shapes: BTreeMap::new(),
            overlay: None,
            surface: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeoPoint, LatLng};
    use crate::map::{CameraPosition, ScreenPoint, VisibleRegion};
    use crate::shapes::{FillStyle, PolygonOptions, PolylineOptions, SerializableColor, Shader};
    use crate::testing::{Command, PlanarProjection, RecordingSurface};
    use kurbo::Size;
    use peniko::Color;

    #[derive(Debug, Clone, PartialEq)]
    enum OverlayCall {
        Add { handle: OverlayHandle, size: (u32, u32), z_index: f32 },
        Update { handle: OverlayHandle, size: (u32, u32) },
        Remove { handle: OverlayHandle },
    }

    /// Planar map with a settable zoom that records overlay calls.
    #[derive(Default)]
    struct FakeMap {
        zoom: f32,
        next_handle: u64,
        calls: Vec<OverlayCall>,
    }

    struct FakeProjection;

    impl Projection for FakeProjection {
        fn to_screen_location(&self, position: LatLng) -> ScreenPoint {
            PlanarProjection.to_screen_location(position)
        }

        fn visible_region(&self) -> VisibleRegion {
            PlanarProjection.visible_region()
        }
    }

    impl MapView for FakeMap {
        type Projection = FakeProjection;

        fn camera_position(&self) -> CameraPosition {
            CameraPosition::new(LatLng::new(50.0, 50.0), self.zoom)
        }

        fn projection(&self) -> FakeProjection {
            FakeProjection
        }
    }

    impl OverlayHost<RecordingSurface> for FakeMap {
        fn add_ground_overlay(
            &mut self,
            image: &RecordingSurface,
            _placement: &OverlayPlacement,
            z_index: f32,
        ) -> OverlayHandle {
            self.next_handle += 1;
            let handle = OverlayHandle(self.next_handle);
            self.calls.push(OverlayCall::Add {
                handle,
                size: (image.width, image.height),
                z_index,
            });
            handle
        }

        fn update_ground_overlay(
            &mut self,
            handle: OverlayHandle,
            image: &RecordingSurface,
            _placement: &OverlayPlacement,
        ) {
            self.calls.push(OverlayCall::Update {
                handle,
                size: (image.width, image.height),
            });
        }

        fn remove_ground_overlay(&mut self, handle: OverlayHandle) {
            self.calls.push(OverlayCall::Remove { handle });
        }
    }

    type TestLayer = RichLayer<Size, FakeMap, RecordingSurface>;

    fn layer(zoom: f32) -> TestLayer {
        LayerBuilder::new()
            .view(Size::new(100.0, 80.0))
            .map(FakeMap {
                zoom,
                ..Default::default()
            })
            .z_index(2.5)
            .build()
            .unwrap()
    }

    fn square(color: Color, z_index: i32) -> Shape {
        let points = [(10.0, 10.0), (90.0, 10.0), (90.0, 70.0), (10.0, 70.0)]
            .into_iter()
            .map(|(x, y)| GeoPoint::new(LatLng::new(y, x)));
        PolygonOptions::new(points)
            .fill_color(color)
            .fill_style(FillStyle::Fill)
            .z_index(z_index)
            .build()
            .into()
    }

    fn fill_colors(layer: &TestLayer) -> Vec<SerializableColor> {
        layer
            .surface()
            .unwrap()
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::Fill {
                    paint: crate::surface::FillPaint {
                        shader: Shader::Solid { color },
                        ..
                    },
                    ..
                } => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_build_requires_collaborators() {
        let missing_map = LayerBuilder::<Size, FakeMap>::new()
            .view(Size::new(10.0, 10.0))
            .build::<RecordingSurface>();
        assert!(matches!(missing_map, Err(LayerError::MissingCollaborator("map"))));

        let missing_view = LayerBuilder::<Size, FakeMap>::new()
            .map(FakeMap::default())
            .build::<RecordingSurface>();
        assert!(matches!(missing_view, Err(LayerError::MissingCollaborator("view"))));
    }

    #[test]
    fn test_add_and_remove_shapes() {
        let mut layer = layer(10.0);
        let a = layer.add_shape(PolylineOptions::new().z_index(1).build());
        let b = layer.add_shape(PolylineOptions::new().z_index(1).build());
        let c = layer.add_shape(PolylineOptions::new().z_index(-4).build());
        assert_eq!(layer.len(), 3);
        assert!(layer.contains(a) && layer.contains(b) && layer.contains(c));

        assert_eq!(layer.remove_shape(b).map(|s| s.id()), Some(b));
        assert_eq!(layer.len(), 2);
        assert!(!layer.contains(b));
        assert_eq!(layer.shape_ids(), vec![c, a]);

        layer.remove_shape(a);
        layer.remove_shape(c);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut layer = layer(10.0);
        let a = layer.add_shape(PolylineOptions::new().build());
        let b = layer.add_shape(PolylineOptions::new().build());
        assert!(layer.remove_shape(a).is_some());
        let after_first = layer.shape_ids();
        assert!(layer.remove_shape(a).is_none());
        assert_eq!(layer.shape_ids(), after_first);
        assert_eq!(after_first, vec![b]);
    }

    #[test]
    fn test_paint_order_by_z_index_then_insertion() {
        let red = Color::from_rgba8(255, 0, 0, 255);
        let green = Color::from_rgba8(0, 255, 0, 255);
        let blue = Color::from_rgba8(0, 0, 255, 255);

        let mut layer = layer(10.0);
        layer.add_shape(square(red, 2));
        layer.add_shape(square(blue, 1));
        layer.add_shape(square(green, 2));
        layer.refresh().unwrap();

        assert_eq!(
            fill_colors(&layer),
            vec![
                SerializableColor::from(blue),
                SerializableColor::from(red),
                SerializableColor::from(green),
            ]
        );
    }

    #[test]
    fn test_refresh_below_min_zoom_has_no_overlay() {
        let mut layer = layer(4.9);
        layer.add_shape(square(Color::WHITE, 0));
        layer.refresh().unwrap();
        assert_eq!(layer.state(), LayerState::NoOverlay);
        assert!(layer.surface().is_none());
        assert!(layer.map().calls.is_empty());
    }

    #[test]
    fn test_refresh_at_min_zoom_publishes_overlay() {
        let mut layer = layer(MINIMUM_ZOOM_LEVEL);
        layer.refresh().unwrap();
        assert_eq!(layer.state(), LayerState::OverlayActive);
        assert_eq!(
            layer.map().calls,
            vec![OverlayCall::Add {
                handle: OverlayHandle(1),
                size: (100, 80),
                z_index: 2.5,
            }]
        );
    }

    #[test]
    fn test_second_refresh_updates_in_place() {
        let mut layer = layer(12.0);
        layer.refresh().unwrap();
        layer.refresh().unwrap();
        assert_eq!(layer.map().calls.len(), 2);
        assert_eq!(
            layer.map().calls[1],
            OverlayCall::Update {
                handle: OverlayHandle(1),
                size: (100, 80),
            }
        );
    }

    #[test]
    fn test_zooming_out_withdraws_overlay() {
        let mut layer = layer(12.0);
        layer.refresh().unwrap();
        layer.map_mut().zoom = 3.0;
        layer.refresh().unwrap();
        assert_eq!(layer.state(), LayerState::NoOverlay);
        assert_eq!(
            layer.map().calls.last(),
            Some(&OverlayCall::Remove {
                handle: OverlayHandle(1)
            })
        );

        layer.map_mut().zoom = 12.0;
        layer.refresh().unwrap();
        assert_eq!(layer.overlay(), Some(OverlayHandle(2)));
    }

    #[test]
    fn test_surface_reused_then_reallocated_on_resize() {
        let mut layer = layer(12.0);
        layer.add_shape(square(Color::WHITE, 0));
        layer.refresh().unwrap();
        layer.refresh().unwrap();
        // Reused surfaces are cleared before redrawing.
        assert_eq!(layer.surface().unwrap().commands[0], Command::Clear);

        *layer.view_mut() = Size::new(50.0, 40.0);
        layer.refresh().unwrap();
        let surface = layer.surface().unwrap();
        assert_eq!((surface.width, surface.height), (50, 40));
        assert!(!matches!(surface.commands[0], Command::Clear));
    }

    #[test]
    fn test_zero_sized_view_is_an_error() {
        let mut layer = layer(12.0);
        *layer.view_mut() = Size::ZERO;
        assert_eq!(
            layer.refresh(),
            Err(LayerError::Surface(SurfaceError::InvalidSize {
                width: 0,
                height: 0
            }))
        );
        assert_eq!(layer.state(), LayerState::NoOverlay);
    }

    #[test]
    fn test_custom_min_zoom_level() {
        let mut layer: TestLayer = LayerBuilder::new()
            .view(Size::new(10.0, 10.0))
            .map(FakeMap {
                zoom: 2.0,
                ..Default::default()
            })
            .config(LayerConfig {
                z_index: 0.0,
                min_zoom_level: 1.0,
            })
            .build()
            .unwrap();
        layer.refresh().unwrap();
        assert_eq!(layer.state(), LayerState::OverlayActive);
    }

    #[test]
    fn test_holes_added_through_shape_mut_are_drawn() {
        let mut layer = layer(10.0);
        let id = layer.add_shape(square(Color::WHITE, 0));
        let hole = [(40.0, 30.0), (60.0, 30.0), (60.0, 50.0), (40.0, 50.0)]
            .into_iter()
            .map(|(x, y)| GeoPoint::new(LatLng::new(y, x)))
            .collect();
        layer
            .shape_mut(id)
            .and_then(Shape::as_polygon_mut)
            .unwrap()
            .add_hole(hole);
        layer.refresh().unwrap();

        let commands = &layer.surface().unwrap().commands;
        assert!(matches!(commands[0], Command::Fill { .. }));
        assert!(matches!(commands[1], Command::Erase { .. }));
        assert!(layer.shape_mut(uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_layer_config_from_json() {
        let config: LayerConfig = serde_json::from_str(r#"{"z_index": 3.0}"#).unwrap();
        assert!((config.z_index - 3.0).abs() < f32::EPSILON);
        assert!((config.min_zoom_level - MINIMUM_ZOOM_LEVEL).abs() < f32::EPSILON);
    }
}
