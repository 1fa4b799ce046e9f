//! Risk Matrix - Development entry point
//!
//! Generates random demo risks, runs the full pipeline and writes
//! `risk_matrix.png` and `risk_matrix_presentation.pptx` to the current
//! directory. Picks up `matrix_config.json` from the current directory if present.
//!
//! Usage:
//! ```bash
//! cargo run --bin dev -- --count 100 --seed 42
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use risk_matrix::config::MatrixConfig;
use risk_matrix::matrix::{MatrixInput, Risk, GRID_SIZE};
use risk_matrix::{logging, pipeline};

const DEFAULT_COUNT: usize = 100;
const DEFAULT_SEED: u64 = 42;
const CONFIG_PATH: &str = "matrix_config.json";

fn log_phase(start: Instant, phase: &str) {
    let elapsed = start.elapsed();
    eprintln!("[PHASE @{:.3}s] {}", elapsed.as_secs_f64(), phase);
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    logging::init("info");

    log_phase(start, "START: Development run");
    println!("=== Risk Matrix - Development Mode ===\n");

    let args: Vec<String> = std::env::args().collect();
    let (count, seed) = parse_args(&args)?;

    log_phase(start, "PHASE 1: Generating demo data");
    let input = demo_input(count, seed);
    println!("Demo data:");
    println!("  Risks: {} (seed {})", input.risks.len(), seed);
    println!("  Material cells: {}", input.material_cells.len());
    println!();

    let config = load_dev_config()?;

    log_phase(start, "PHASE 2: Running pipeline");
    let artifacts = pipeline::generate_matrix(
        &input,
        &config,
        Path::new("risk_matrix.png"),
        Some(Path::new("risk_matrix_presentation.pptx")),
    )?;

    println!("✓ Saved {}", artifacts.image.display());
    if let Some(deck) = &artifacts.deck {
        println!("✓ Saved {}", deck.display());
    }
    println!(
        "  {} bubbles in {} occupied cells",
        artifacts.description.bubbles.len(),
        artifacts
            .description
            .bubbles
            .iter()
            .map(|b| b.cell)
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    );

    log_phase(start, "COMPLETE");
    println!("\n=== Development Run Complete ===");
    Ok(())
}

/// `count` risks with uniform scores, ids 1..=count; every cell with impact 1
/// or 2 is material
fn demo_input(count: usize, seed: u64) -> MatrixInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let max = GRID_SIZE as i64;
    let risks = (1..=count as i64)
        .map(|id| Risk::new(id, rng.gen_range(1..=max), rng.gen_range(1..=max)))
        .collect();
    let material_cells = (1..=max)
        .flat_map(|likelihood| (1..=2).map(move |impact| (likelihood, impact)))
        .collect();
    MatrixInput {
        risks,
        material_cells,
        ..Default::default()
    }
}

fn parse_args(args: &[String]) -> anyhow::Result<(usize, u64)> {
    let mut count = DEFAULT_COUNT;
    let mut seed = DEFAULT_SEED;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" if i + 1 < args.len() => {
                count = args[i + 1].parse().context("--count expects an integer")?;
                i += 2;
            }
            "--seed" if i + 1 < args.len() => {
                seed = args[i + 1].parse().context("--seed expects an integer")?;
                i += 2;
            }
            other => bail!("unexpected argument '{}'", other),
        }
    }
    Ok((count, seed))
}

/// Load configuration from matrix_config.json if it exists
fn load_dev_config() -> anyhow::Result<MatrixConfig> {
    if !Path::new(CONFIG_PATH).exists() {
        println!("  No {} found, using defaults", CONFIG_PATH);
        return Ok(MatrixConfig::default());
    }
    let config = MatrixConfig::from_file(CONFIG_PATH)
        .with_context(|| format!("loading {}", CONFIG_PATH))?;
    println!("  Loaded configuration from {}", CONFIG_PATH);
    Ok(config)
}
