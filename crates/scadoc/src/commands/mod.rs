//! CLI command implementations.

pub mod digest;
pub mod render;

pub use digest::DigestArgs;
pub use render::RenderArgs;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use scadoc_config::{CliSettings, Config};
use scadoc_directive::{ScadBlock, ScadOptions};
use scadoc_render::ScadRenderer;

use crate::error::CliError;

/// Directive options shared by the render and digest commands.
///
/// Mirrors the option set of the embedded `scad` block, so a command
/// line is the directive's option list spelled as flags.
#[derive(Args)]
pub struct BlockOptions {
    /// Image width style, e.g. "200px".
    #[arg(long)]
    pub width: Option<String>,

    /// Image alignment, emitted as class="align-<VALUE>".
    #[arg(long)]
    pub align: Option<String>,

    /// Camera position, passed to the renderer as --camera=<VALUE>.
    #[arg(long)]
    pub camera: Option<String>,

    /// View options, passed to the renderer as --view <VALUE>.
    #[arg(long)]
    pub axes: Option<String>,

    /// Zoom to fit the whole model.
    #[arg(long)]
    pub viewall: bool,

    /// Center the model in the view.
    #[arg(long)]
    pub autocenter: bool,
}

impl BlockOptions {
    /// Build the directive option set from the flags.
    pub fn to_options(&self) -> Result<ScadOptions, CliError> {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(width) = &self.width {
            pairs.push(("width", width));
        }
        if let Some(align) = &self.align {
            pairs.push(("align", align));
        }
        if let Some(camera) = &self.camera {
            pairs.push(("camera", camera));
        }
        if let Some(axes) = &self.axes {
            pairs.push(("axes", axes));
        }
        if self.viewall {
            pairs.push(("viewall", ""));
        }
        if self.autocenter {
            pairs.push(("autocenter", ""));
        }
        Ok(ScadOptions::from_pairs(pairs)?)
    }
}

/// Build a block node from a model source file.
///
/// The file's lines are joined the way a directive body would be, and
/// the file stem doubles as the owning document name.
pub fn block_from_file(
    input: &Path,
    options: &ScadOptions,
) -> Result<ScadBlock, CliError> {
    let content = std::fs::read_to_string(input)?;
    let docname = input
        .file_stem()
        .map_or_else(|| input.display().to_string(), |stem| stem.to_string_lossy().into_owned());
    Ok(ScadBlock::from_lines(content.lines(), options, &docname))
}

/// Build a renderer from the resolved configuration.
pub fn renderer_from_config(config: &Config) -> ScadRenderer {
    ScadRenderer::new(
        &config.renderer_resolved.binary,
        &config.build_resolved.out_dir,
    )
    .images_dir(config.build_resolved.images_dir.clone())
    .img_path_prefix(config.build_resolved.img_path_prefix.clone())
    .timeout(Duration::from_secs(config.renderer_resolved.timeout_secs))
    .force(config.renderer_resolved.force)
}

/// Load configuration, applying command-line overrides.
pub fn load_config(
    config_path: Option<&PathBuf>,
    out_dir: Option<&PathBuf>,
    force: bool,
) -> Result<Config, CliError> {
    let settings = CliSettings {
        out_dir: out_dir.cloned(),
        force: force.then_some(true),
        ..Default::default()
    };
    Ok(Config::load(config_path.map(PathBuf::as_path), Some(&settings))?)
}
