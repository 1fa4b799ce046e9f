//! Rendering of laid-out risk matrices
//!
//! - `surface.rs`: the drawing capability set (`Surface` trait)
//! - `raster.rs`: RGB pixel buffer backend with PNG export
//! - `font.rs`: embedded bitmap fonts
//! - `renderer.rs`: maps a `GeometricDescription` onto a surface

pub mod font;
pub mod raster;
pub mod renderer;
pub mod surface;

pub use font::Face;
pub use raster::{PngCompression, RasterSurface};
pub use renderer::{export_png, render, PlotFrame, RenderOptions};
pub use surface::{Anchor, ClipCircle, PixelRect, PixelTick, Surface, TextStyle, TickAxis};
