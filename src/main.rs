//! Risk Matrix - Main entry point
//!
//! Reads a risk document (JSON), lays out the 6×6 matrix, writes the PNG and
//! embeds it into a single-slide presentation.
//!
//! Usage:
//! ```bash
//! risk_matrix --input risks.json [--config matrix_config.json] \
//!     [--image risk_matrix.png] [--deck risk_matrix_presentation.pptx] [--no-deck]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use risk_matrix::config::MatrixConfig;
use risk_matrix::matrix::MatrixInput;
use risk_matrix::{logging, pipeline};

const DEFAULT_IMAGE: &str = "risk_matrix.png";
const DEFAULT_DECK: &str = "risk_matrix_presentation.pptx";

#[derive(Debug, PartialEq)]
struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    image: PathBuf,
    deck: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init("info");
    println!("Risk Matrix v{}\n", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args).and_then(|args| run(&args)) {
        Ok(()) => {
            println!("\n✓ Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n✗ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    println!("[1/3] Loading input and configuration...");
    let input = MatrixInput::from_file(&args.input)
        .with_context(|| format!("reading risks from {}", args.input.display()))?;
    let config = match &args.config {
        Some(path) => MatrixConfig::from_file(path)
            .with_context(|| format!("reading configuration from {}", path.display()))?,
        None => MatrixConfig::default(),
    };
    println!("  Risks: {}", input.risks.len());
    println!("  Material cells: {}", input.material_cells.len());
    println!("  Overflow policy: {:?}", config.layout.overflow);
    println!("  Impact axis: {:?}", config.layout.impact_order);

    println!("\n[2/3] Rendering...");
    let artifacts =
        pipeline::generate_matrix(&input, &config, &args.image, args.deck.as_deref())
            .context("generating risk matrix")?;
    println!("✓ Image: {}", artifacts.image.display());
    if !artifacts.description.overflow.is_empty() {
        let hidden: usize = artifacts.description.overflow.iter().map(|m| m.hidden).sum();
        println!(
            "  {} risk(s) hidden in {} over-full cell(s)",
            hidden,
            artifacts.description.overflow.len()
        );
    }

    println!("\n[3/3] Presentation...");
    match &artifacts.deck {
        Some(deck) => println!("✓ Deck: {}", deck.display()),
        None => println!("  Skipped (--no-deck)"),
    }
    Ok(())
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut input = None;
    let mut config = None;
    let mut image = PathBuf::from(DEFAULT_IMAGE);
    let mut deck = Some(PathBuf::from(DEFAULT_DECK));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" if i + 1 < args.len() => {
                input = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--config" if i + 1 < args.len() => {
                config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--image" if i + 1 < args.len() => {
                image = PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--deck" if i + 1 < args.len() => {
                deck = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--no-deck" => {
                deck = None;
                i += 1;
            }
            other => bail!("unexpected argument '{}'", other),
        }
    }

    let Some(input) = input else {
        bail!("missing --input <risks.json>");
    };
    Ok(Args {
        input,
        config,
        image,
        deck,
    })
}
