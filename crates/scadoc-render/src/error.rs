//! Render error taxonomy.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Error produced while rendering one block.
///
/// Launch failure, non-zero exit, and a missing output image are kept
/// distinct so callers can report them differently. All of them degrade
/// to the emitter's textual fallback for the affected block; none of
/// them aborts a build.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer process could not be started.
    #[error("failed to launch renderer '{binary}': {source}")]
    Launch {
        /// The binary that failed to start.
        binary: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The renderer exited with a non-zero status.
    #[error("renderer exited with {status}: {stderr}")]
    Failed {
        /// The subprocess exit status.
        status: ExitStatus,
        /// Excerpt of the renderer's stderr output.
        stderr: String,
    },

    /// The renderer exceeded the configured timeout and was killed.
    #[error("renderer timed out after {timeout_secs}s")]
    Timeout {
        /// The timeout that was exceeded, in seconds.
        timeout_secs: u64,
    },

    /// The renderer reported success but produced no output image.
    #[error("renderer reported success but produced no image at {}", path.display())]
    ArtifactMissing {
        /// Where the image was expected.
        path: PathBuf,
    },

    /// Filesystem error while staging input or persisting the artifact.
    #[error("I/O error during render: {0}")]
    Io(#[from] std::io::Error),
}
