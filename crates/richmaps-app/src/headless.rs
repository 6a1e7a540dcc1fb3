//! A map host without a window: keeps published overlays in memory.

use kurbo::Size;
use richmaps_core::{
    CameraPosition, MapCamera, MapView, OverlayHandle, OverlayHost, OverlayPlacement, Surface,
};
use richmaps_render::PixmapSurface;
use std::collections::BTreeMap;

/// A ground overlay as the map received it.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedOverlay {
    pub placement: OverlayPlacement,
    pub z_index: f32,
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA8 pixels, row-major.
    pub rgba: Vec<u8>,
}

impl PublishedOverlay {
    fn new(image: &PixmapSurface, placement: &OverlayPlacement, z_index: f32) -> Self {
        Self {
            placement: *placement,
            z_index,
            width: image.width(),
            height: image.height(),
            rgba: image.to_rgba8(),
        }
    }
}

/// Headless map over a Web-Mercator camera.
#[derive(Debug, Clone)]
pub struct HeadlessMap {
    camera: MapCamera,
    overlays: BTreeMap<u64, PublishedOverlay>,
    next_handle: u64,
}

impl HeadlessMap {
    pub fn new(position: CameraPosition, viewport: Size) -> Self {
        Self {
            camera: MapCamera::new(position, viewport),
            overlays: BTreeMap::new(),
            next_handle: 0,
        }
    }

    /// Mutable camera access. Resizing here alone leaves the layer's image
    /// size behind; use [`resize_view`](crate::resize_view) for that.
    pub fn camera_mut(&mut self) -> &mut MapCamera {
        &mut self.camera
    }

    pub fn overlay(&self, handle: OverlayHandle) -> Option<&PublishedOverlay> {
        self.overlays.get(&handle.0)
    }

    /// Overlays currently on the map, oldest first.
    pub fn overlays(&self) -> impl Iterator<Item = &PublishedOverlay> {
        self.overlays.values()
    }
}

impl MapView for HeadlessMap {
    type Projection = MapCamera;

    fn camera_position(&self) -> CameraPosition {
        self.camera.camera_position()
    }

    fn projection(&self) -> MapCamera {
        self.camera.projection()
    }
}

impl OverlayHost<PixmapSurface> for HeadlessMap {
    fn add_ground_overlay(
        &mut self,
        image: &PixmapSurface,
        placement: &OverlayPlacement,
        z_index: f32,
    ) -> OverlayHandle {
        self.next_handle += 1;
        log::debug!(
            "overlay {} added: {}x{} px spanning {:.0} m",
            self.next_handle,
            image.width(),
            image.height(),
            placement.width_meters
        );
        self.overlays
            .insert(self.next_handle, PublishedOverlay::new(image, placement, z_index));
        OverlayHandle(self.next_handle)
    }

    fn update_ground_overlay(
        &mut self,
        handle: OverlayHandle,
        image: &PixmapSurface,
        placement: &OverlayPlacement,
    ) {
        match self.overlays.get_mut(&handle.0) {
            Some(overlay) => *overlay = PublishedOverlay::new(image, placement, overlay.z_index),
            None => log::warn!("update of unknown overlay {:?}", handle),
        }
    }

    fn remove_ground_overlay(&mut self, handle: OverlayHandle) {
        if self.overlays.remove(&handle.0).is_none() {
            log::warn!("removal of unknown overlay {:?}", handle);
        }
    }
}
