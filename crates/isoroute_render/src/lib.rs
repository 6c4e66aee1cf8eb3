//! Software raster canvas
//!
//! This crate implements the engine's [`Canvas`](isoroute_core::Canvas)
//! collaborator as a headless software rasterizer: projected solid faces are
//! shaded against a fixed light, scanline-filled into an RGBA image buffer,
//! and saved as PNG.
//!
//! ## Key Components
//!
//! - [`RasterCanvas`] - the image-backed canvas implementation
//!
//! The engine itself only depends on the `Canvas` trait; this crate exists
//! so routes can be rendered without a browser or GPU surface.

pub mod raster;

pub use raster::RasterCanvas;

// Re-export the engine types for convenience
pub use isoroute_core::{Canvas, Scene, SceneConfig};
pub use isoroute_math::{Color, Path, Point3, Solid};
