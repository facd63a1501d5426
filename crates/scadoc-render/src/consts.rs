//! Internal constants for model rendering.

/// Subdirectory under the build image tree holding rendered models.
pub const SCAD_SUBDIR: &str = "scad";

/// Default subprocess timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Staging input filename handed to the renderer.
pub(crate) const MODEL_FILENAME: &str = "model.scad";

/// Staging output filename the renderer is asked to produce.
pub(crate) const OUTPUT_FILENAME: &str = "model.png";

/// Staging file capturing the renderer's stderr.
pub(crate) const STDERR_FILENAME: &str = "stderr.log";

/// Maximum stderr excerpt carried in a render error.
pub(crate) const STDERR_EXCERPT_LIMIT: usize = 2048;
