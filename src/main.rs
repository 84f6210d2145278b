//! meshpress CLI
//!
//! Converts a scene document into quantized P3D mesh buffers plus sidecar
//! metadata and relocated textures.

mod json_scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

use meshpress_core::Error;
use meshpress_encoder::EncodeOptions;
use meshpress_export::AssetExporter;
use meshpress_scene::{SceneSource, SceneSummary};

use json_scene::JsonSceneSource;

/// meshpress - scene graph to P3D mesh converter
#[derive(Parser)]
#[command(name = "meshpress")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Scene document to convert
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "./out")]
    output: PathBuf,

    /// Zoom factor for vertices
    #[arg(short, long, default_value_t = 1.0)]
    zoom: f32,

    /// Normalize vertices to [-1,1] around the scene bounds
    #[arg(short, long)]
    norm: bool,

    /// Merge meshes with the same material
    #[arg(short, long)]
    merge: bool,

    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if !json_scene::supports(&cli.input) {
        let ext = cli
            .input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        return Err(Error::unsupported_input(format!("input format .{} unknown", ext)).into());
    }

    let source = JsonSceneSource::new(&cli.input);
    let mut scene = source.load().context("Failed to load scene")?;

    let summary = SceneSummary::inspect(&mut scene, cli.merge);
    info!(units = summary.units.len(), "scene inspected");

    let bounds = summary.bounds.unwrap_or_default();
    let exporter = AssetExporter::with_options(
        &cli.output,
        EncodeOptions {
            zoom: cli.zoom,
            normalize: cli.norm,
        },
    );

    let report = exporter
        .export_units(&summary.units, &bounds)
        .context("Export failed")?;

    println!("Conversion complete:");
    println!("  Exported: {}", report.exported);
    println!("  Failed:   {}", report.failed);
    println!("  Textures: {}", report.textures_written);

    Ok(())
}
