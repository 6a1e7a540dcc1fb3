//! JSON scene files.

use crate::error::AppResult;
use kurbo::Size;
use richmaps_core::{CameraPosition, LayerConfig, ShapeOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel size of the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl From<ViewportSize> for Size {
    fn from(v: ViewportSize) -> Self {
        Size::new(v.width as f64, v.height as f64)
    }
}

/// A camera, a view size and the shapes of one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub camera: CameraPosition,
    pub viewport: ViewportSize,
    #[serde(default)]
    pub layer: LayerConfig,
    #[serde(default)]
    pub shapes: Vec<ShapeOptions>,
}

impl Scene {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a scene file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use richmaps_core::{LatLng, PolylineOptions};

    #[test]
    fn test_minimal_scene_uses_defaults() {
        let scene = Scene::from_json(
            r#"{"camera": {"target": {"latitude": 40.0, "longitude": -3.0}, "zoom": 12.0},
                "viewport": {"width": 64, "height": 48}}"#,
        )
        .unwrap();
        assert_eq!(scene.layer, LayerConfig::default());
        assert!(scene.shapes.is_empty());
        assert!((scene.camera.bearing - 0.0).abs() < f32::EPSILON);
        assert_eq!(Size::from(scene.viewport), Size::new(64.0, 48.0));
    }

    #[test]
    fn test_scene_json_roundtrip() {
        let scene = Scene {
            camera: CameraPosition::new(LatLng::new(1.0, 2.0), 8.0).with_bearing(15.0),
            viewport: ViewportSize {
                width: 10,
                height: 20,
            },
            layer: LayerConfig {
                z_index: 2.0,
                min_zoom_level: 3.0,
            },
            shapes: vec![ShapeOptions::Polyline(PolylineOptions::new().z_index(4))],
        };
        let back = Scene::from_json(&scene.to_json().unwrap()).unwrap();
        assert_eq!(back, scene);
    }

    #[test]
    fn test_malformed_scene_is_rejected() {
        assert!(matches!(
            Scene::from_json(r#"{"camera": 1}"#),
            Err(crate::error::AppError::Json(_))
        ));
    }
}
