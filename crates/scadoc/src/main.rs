//! Scadoc CLI - OpenSCAD models in documentation builds.
//!
//! Provides commands for:
//! - `render`: render a model file into the build image tree and print
//!   the emitted markup fragment
//! - `digest`: print the cache digest and artifact location for a model
//!   without invoking the renderer

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DigestArgs, RenderArgs};
use output::Output;

/// Scadoc - build-time OpenSCAD rendering for documentation.
#[derive(Parser)]
#[command(name = "scadoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a model file into the build image tree.
    Render(RenderArgs),
    /// Print the cache digest for a model file without rendering.
    Digest(DigestArgs),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&output),
        Commands::Digest(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
