//! RichMaps App Library
//!
//! Headless host for rich layers: loads a JSON scene, renders it through a
//! [`RichLayer`](richmaps_core::RichLayer) and exports the overlay image.

pub mod error;
pub mod export;
pub mod headless;
pub mod scene;

pub use error::{AppError, AppResult};
pub use export::{encode_png, write_overlay_png};
pub use headless::{HeadlessMap, PublishedOverlay};
pub use scene::{Scene, ViewportSize};

use kurbo::Size;
use richmaps_core::RichLayer;
use richmaps_render::PixmapSurface;

/// Layer hosted on the headless map.
pub type HeadlessLayer = RichLayer<Size, HeadlessMap, PixmapSurface>;

/// Build a layer holding every shape of `scene`.
pub fn build_layer(scene: Scene) -> AppResult<HeadlessLayer> {
    let size = Size::from(scene.viewport);
    let mut layer: HeadlessLayer = HeadlessLayer::builder()
        .view(size)
        .map(HeadlessMap::new(scene.camera, size))
        .config(scene.layer)
        .build()?;
    for options in scene.shapes {
        layer.add_shape(options.build());
    }
    log::debug!("scene loaded with {} shapes", layer.len());
    Ok(layer)
}

/// Resize the rendered view. The layer's image size and the camera viewport
/// change together, so projected shapes keep lining up with the image.
pub fn resize_view(layer: &mut HeadlessLayer, size: Size) {
    *layer.view_mut() = size;
    layer.map_mut().camera_mut().resize(size);
}

/// Render a scene and return the overlay the map received.
pub fn render_scene(scene: Scene) -> AppResult<PublishedOverlay> {
    let zoom = scene.camera.zoom;
    let min_zoom = scene.layer.min_zoom_level;
    let mut layer = build_layer(scene)?;
    layer.refresh()?;

    layer
        .overlay()
        .and_then(|handle| layer.map().overlay(handle))
        .cloned()
        .ok_or(AppError::NoOverlay { zoom, min_zoom })
}
