//! Risk matrix domain module
//!
//! Structure:
//! - `types.rs`: Risk, Cell, MaterialCellSet, AxisLabels
//! - `layout.rs`: grid layout engine producing a `GeometricDescription`
//! - `wrap.rs`: axis label wrapping
//! - `properties.rs`: property registry and typed reader
//! - `palette.rs`: colors
//! - `input.rs`: JSON input document
//! - `error.rs`: Error types

pub mod error;
pub mod input;
pub mod layout;
pub mod palette;
pub mod properties;
pub mod types;
pub mod wrap;

// Re-exports for convenience
pub use error::{ExportError, MatrixError, Result};
pub use input::MatrixInput;
pub use layout::{
    bucket_risks, layout, Axis, Bubble, CellHighlight, GeometricDescription, ImpactOrder,
    LayoutOptions, OverflowMarker, OverflowPolicy, Point, Rect, Slot, Tick,
};
pub use palette::{Color, Palette};
pub use properties::PropertyReader;
pub use types::{
    AxisLabels, Cell, CoordinatePolicy, MaterialCellSet, Risk, RiskId, CELL_CAPACITY, GRID_SIZE,
};
pub use wrap::{wrap_label, WrappedLabel};
