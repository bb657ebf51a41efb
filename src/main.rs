mod app;
mod assets;
mod banner;
mod canvas;
mod config;
mod dialog;
mod text;
mod theme;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::ArtConfig;
use theme::Palette;

#[derive(Parser, Debug)]
#[command(name = "wix-art")]
#[command(version = "0.1.0")]
#[command(about = "Generates the WiX banner and dialog bitmaps for the Kable MSI installer")]
struct Args {}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let _args = Args::parse();

    let palette = Palette::load().context("Theme palette is invalid")?;
    let config = ArtConfig::load();

    println!("Generating WiX installer images...");
    println!("Output directory: {}", config.output_dir.display());
    println!();

    let artifacts = app::run(&palette, &config)?;
    for artifact in &artifacts {
        println!(
            "✓ Created {}: {} ({}x{})",
            artifact.name,
            artifact.path.display(),
            artifact.width,
            artifact.height
        );
    }

    println!();
    println!("✓ All images generated successfully!");
    println!();
    println!("Theme colors used:");
    for (name, color) in palette.entries() {
        println!("  {}: {}", name, theme::rgb_to_hex(color));
    }

    Ok(())
}
