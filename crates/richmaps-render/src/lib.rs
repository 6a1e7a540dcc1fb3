//! RichMaps Render Library
//!
//! CPU rasterization of layer draw commands into RGBA pixmaps, used as
//! ground overlay images.

mod blur;
mod paint;
mod pixmap_surface;


pub use pixmap_surface::PixmapSurface;
