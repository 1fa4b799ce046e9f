//! Shared risk matrix pipeline
//!
//! Used by both the production driver (main.rs) and the demo driver (dev.rs).
//!
//! The pipeline:
//! 1. Validates configuration, labels and material cells, then lays out the grid
//! 2. Renders and writes the PNG
//! 3. Embeds the PNG into a single-slide deck (optional)

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::MatrixConfig;
use crate::deck::{PptxEmbedder, SlideEmbedder};
use crate::matrix::{
    layout, AxisLabels, GeometricDescription, MaterialCellSet, MatrixInput, Result, Risk,
};
use crate::render::export_png;

/// Files written by one pipeline run, plus the layout they were drawn from
#[derive(Debug, Clone)]
pub struct MatrixArtifacts {
    pub image: PathBuf,
    pub deck: Option<PathBuf>,
    pub description: GeometricDescription,
}

/// Lay out, render and export a risk matrix from an input document
pub fn generate_matrix(
    input: &MatrixInput,
    config: &MatrixConfig,
    image_path: &Path,
    deck_path: Option<&Path>,
) -> Result<MatrixArtifacts> {
    let labels = input.axis_labels()?;
    let material = input.material(config.layout.coordinates)?;
    let embedder = PptxEmbedder::new(config.placement)
        .with_title(config.render.title.clone().unwrap_or_else(|| "Risk Matrix".into()));
    generate_with(
        &input.risks,
        &material,
        &labels,
        config,
        image_path,
        deck_path.map(|p| (p, &embedder as &dyn SlideEmbedder)),
    )
}

/// Same as `generate_matrix` with already-validated inputs and a caller-chosen
/// embedder
pub fn generate_with(
    risks: &[Risk],
    material: &MaterialCellSet,
    labels: &AxisLabels,
    config: &MatrixConfig,
    image_path: &Path,
    deck: Option<(&Path, &dyn SlideEmbedder)>,
) -> Result<MatrixArtifacts> {
    let t0 = Instant::now();
    config.validate()?;

    tracing::info!(
        risks = risks.len(),
        material_cells = material.len(),
        overflow = ?config.layout.overflow,
        impact_order = ?config.layout.impact_order,
        "laying out grid"
    );
    let description = layout(risks, material, labels, &config.layout)?;
    tracing::info!(
        bubbles = description.bubbles.len(),
        highlights = description.highlights.len(),
        overflowing_cells = description.overflow.len(),
        "layout done"
    );

    tracing::info!(
        width = config.render.width_px,
        height = config.render.height_px,
        "rendering image"
    );
    let image = export_png(&description, &config.render, image_path)?;

    let deck = match deck {
        Some((deck_path, embedder)) => {
            tracing::info!(deck = %deck_path.display(), "embedding image into deck");
            Some(embedder.embed(&image, deck_path)?)
        }
        None => {
            tracing::info!("deck export skipped");
            None
        }
    };

    tracing::info!(elapsed_ms = t0.elapsed().as_millis() as u64, "pipeline finished");

    Ok(MatrixArtifacts {
        image,
        deck,
        description,
    })
}
