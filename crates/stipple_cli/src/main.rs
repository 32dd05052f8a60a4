//! stipple: render a TOML scene of widget draw steps to PNG
//!
//! ```text
//! stipple scenes/widgets.toml -o widgets.png
//! RUST_LOG=stipple_raster=trace stipple scenes/widgets.toml
//! ```

mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::SceneConfig;

#[derive(Parser)]
#[command(name = "stipple", version, about = "Render widget scenes with the Stipple rasterizer")]
struct Cli {
    /// Scene file, or a directory holding scene.toml
    scene: PathBuf,

    /// Output PNG (defaults to the scene path with a .png extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let scene = SceneConfig::load(&cli.scene)?;
    tracing::debug!(
        "scene {}x{} {} with {} steps",
        scene.surface.width,
        scene.surface.height,
        scene.surface.format,
        scene.steps.len()
    );

    let output = cli
        .output
        .unwrap_or_else(|| cli.scene.with_extension("png"));
    render::render_to_file(&scene, &output)
}
