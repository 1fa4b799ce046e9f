//! Risk Matrix Library
//!
//! Lays out a 6×6 likelihood/impact risk matrix, renders it to PNG and embeds
//! the image into a single-slide presentation.
//!
//! Module organization:
//! - `matrix`: domain types, layout engine, label wrapping, properties
//! - `render`: drawing surface, raster backend, renderer
//! - `deck`: presentation package writer
//! - `config`: typed configuration from properties
//! - `pipeline`: layout → PNG → deck, shared by both binaries

pub mod config;
pub mod deck;
pub mod logging;
pub mod matrix;
pub mod pipeline;
pub mod render;
