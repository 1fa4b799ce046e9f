//! Single-slide presentation export
//!
//! - `parts.rs`: fixed package parts (content types, master, layout, theme)
//! - `slide.rs`: picture slide and placement in EMU
//! - `package.rs`: zip container writer and the `SlideEmbedder` seam

pub mod package;
pub mod parts;
pub mod slide;

pub use package::{PptxEmbedder, SlideEmbedder};
pub use slide::{inches_to_emu, SlidePlacement, EMU_PER_INCH};
