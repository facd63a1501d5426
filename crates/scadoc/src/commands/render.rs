//! The `render` command.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use scadoc_emit::{OutputFormat, emit_block};

use crate::error::CliError;
use crate::output::Output;

use super::{BlockOptions, block_from_file, load_config, renderer_from_config};

/// Output format flag for the render command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    /// Page-oriented output with an embedded image reference.
    Html,
    /// Print-oriented literal passthrough, no rendering.
    Latex,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => Self::Html,
            Format::Latex => Self::Latex,
        }
    }
}

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Model source file (.scad).
    pub input: PathBuf,

    #[command(flatten)]
    pub options: BlockOptions,

    /// Output format for the emitted fragment.
    #[arg(long, value_enum, default_value = "html")]
    pub format: Format,

    /// Re-render even when a cached artifact exists.
    #[arg(long)]
    pub force: bool,

    /// Path to scadoc.toml (discovered in parent directories by default).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the build output directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    pub fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = load_config(self.config.as_ref(), self.out_dir.as_ref(), self.force)?;
        let options = self.options.to_options()?;
        let block = block_from_file(&self.input, &options)?;
        let renderer = renderer_from_config(&config);

        // A failed render surfaces as the emitter's inline fallback, not
        // as a command error.
        let fragment = emit_block(&block, self.format.into(), &renderer);
        output.emit(&fragment);

        if matches!(self.format, Format::Html) {
            let located = renderer.locate(&block.source, &block.renderer_args);
            if located.cached {
                output.success(&format!(
                    "image: {}",
                    located.artifact_path.display()
                ));
            }
        }
        Ok(())
    }
}
