use anyhow::Result;
use clap::Parser;
use layersync::{SyncConfig, output, sync};
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "layersync",
    version = layersync::VERSION,
    about = "Sync elements_layering.json with the images under ./SourcePack",
    long_about = "Scans every category folder under ./SourcePack, keeps the annotations \
                  already recorded in ./elements_layering.json, adds placeholders for new \
                  images, drops entries for removed ones and rewrites the file."
)]
struct Cli {}

/// Logs go to stderr so the report on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    if let Err(e) = run() {
        output::error(&format!("{e:#}"));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let config = SyncConfig::default();
    sync::synchronize_with(&config, |line| Ok(output::print_line(line, config.color)?))?;

    Ok(())
}
