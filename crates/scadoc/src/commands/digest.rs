//! The `digest` command.

use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

use super::{BlockOptions, block_from_file, load_config, renderer_from_config};

/// Arguments for the digest command.
#[derive(Args)]
pub struct DigestArgs {
    /// Model source file (.scad).
    pub input: PathBuf,

    #[command(flatten)]
    pub options: BlockOptions,

    /// Path to scadoc.toml (discovered in parent directories by default).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the build output directory.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

impl DigestArgs {
    /// Execute the digest command. Never invokes the renderer.
    pub fn execute(&self, output: &Output) -> Result<(), CliError> {
        let config = load_config(self.config.as_ref(), self.out_dir.as_ref(), false)?;
        let options = self.options.to_options()?;
        let block = block_from_file(&self.input, &options)?;
        let renderer = renderer_from_config(&config);

        let located = renderer.locate(&block.source, &block.renderer_args);
        output.emit(&located.digest);
        output.info(&format!("reference: {}", located.reference_path));
        output.info(&format!("artifact:  {}", located.artifact_path.display()));
        output.info(if located.cached {
            "cached:    yes"
        } else {
            "cached:    no"
        });
        Ok(())
    }
}
