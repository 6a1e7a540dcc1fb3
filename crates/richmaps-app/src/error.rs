//! Application errors.

use richmaps_core::LayerError;
use thiserror::Error;

/// Errors from loading, rendering or exporting a scene.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Layer error: {0}")]
    Layer(#[from] LayerError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("No overlay was published (zoom {zoom} is below the minimum {min_zoom})")]
    NoOverlay { zoom: f32, min_zoom: f32 },
    #[error("Usage: {0}")]
    Usage(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
