//! Subprocess invocation of the OpenSCAD renderer.
//!
//! Each render stages its input in a fresh temporary directory and passes
//! absolute paths to the subprocess, so concurrent renders never share
//! scratch files and the parent process's working directory is never
//! touched. Artifacts are persisted under the build output's image tree
//! keyed by content digest and reused on later builds.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::consts::{
    DEFAULT_TIMEOUT_SECS, MODEL_FILENAME, OUTPUT_FILENAME, SCAD_SUBDIR, STDERR_EXCERPT_LIMIT,
    STDERR_FILENAME,
};
use crate::digest::RenderKey;
use crate::error::RenderError;

/// Poll interval while waiting on the subprocess.
const WAIT_POLL: Duration = Duration::from_millis(20);

/// A rendered (or cache-resolved) model image.
#[derive(Debug, Clone)]
pub struct RenderedModel {
    /// Content digest of `source + renderer_args`.
    pub digest: String,
    /// Build-relative reference path, forward slashes, for embedding.
    pub reference_path: String,
    /// Absolute artifact location under the build output directory.
    pub artifact_path: PathBuf,
    /// True when an existing artifact was reused without invoking the
    /// renderer.
    pub cached: bool,
}

/// Invokes the external OpenSCAD binary and persists rendered images.
///
/// The invocation shape is fixed:
/// `<binary> <renderer_args...> --quiet -o <staging>/model.png <staging>/model.scad`
/// with the child's working directory set to the staging directory.
/// Renderer argument values never contain whitespace; the flattened
/// argument string splits on it.
#[derive(Debug, Clone)]
pub struct ScadRenderer {
    binary: PathBuf,
    out_dir: PathBuf,
    images_dir: String,
    img_path_prefix: String,
    timeout: Duration,
    force: bool,
}

impl ScadRenderer {
    /// Create a renderer persisting artifacts under `out_dir`.
    pub fn new(binary: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            out_dir: out_dir.into(),
            images_dir: "_images".to_owned(),
            img_path_prefix: "_images".to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            force: false,
        }
    }

    /// Set the image directory name under the build output directory.
    #[must_use]
    pub fn images_dir(mut self, images_dir: impl Into<String>) -> Self {
        self.images_dir = images_dir.into();
        self
    }

    /// Set the build-relative prefix used in emitted image references.
    #[must_use]
    pub fn img_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.img_path_prefix = prefix.into();
        self
    }

    /// Set the subprocess timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Re-render even when a cached artifact exists.
    #[must_use]
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Resolve digest and artifact paths for a block without rendering.
    ///
    /// `cached` reports whether the artifact already exists on disk.
    #[must_use]
    pub fn locate(&self, source: &str, renderer_args: &str) -> RenderedModel {
        let key = RenderKey {
            source,
            renderer_args,
        };
        let digest = key.digest();
        let (reference_path, artifact_path) = self.artifact_paths(&digest);
        let cached = artifact_path.exists();
        RenderedModel {
            digest,
            reference_path,
            artifact_path,
            cached,
        }
    }

    /// Render a block, reusing a cached artifact when present.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] distinguishing launch failure, non-zero
    /// exit, timeout, a missing output image, and staging I/O failures.
    pub fn render(&self, source: &str, renderer_args: &str) -> Result<RenderedModel, RenderError> {
        let key = RenderKey {
            source,
            renderer_args,
        };
        let digest = key.digest();
        let (reference_path, artifact_path) = self.artifact_paths(&digest);

        if !self.force && artifact_path.exists() {
            tracing::debug!(%digest, "reusing cached model image");
            return Ok(RenderedModel {
                digest,
                reference_path,
                artifact_path,
                cached: true,
            });
        }

        let staging = tempfile::Builder::new()
            .prefix(&format!("scadoc-{}-", &digest[..12]))
            .tempdir()?;
        let input_path = staging.path().join(MODEL_FILENAME);
        let output_path = staging.path().join(OUTPUT_FILENAME);
        let stderr_path = staging.path().join(STDERR_FILENAME);
        fs::write(&input_path, source)?;

        let stderr_file = fs::File::create(&stderr_path)?;
        let mut command = Command::new(&self.binary);
        command
            .args(renderer_args.split_whitespace())
            .arg("--quiet")
            .arg("-o")
            .arg(&output_path)
            .arg(&input_path)
            .current_dir(staging.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(stderr_file);

        tracing::debug!(
            binary = %self.binary.display(),
            args = renderer_args,
            %digest,
            "invoking renderer"
        );

        let mut child = command.spawn().map_err(|source| RenderError::Launch {
            binary: self.binary.display().to_string(),
            source,
        })?;
        let status = self.wait_with_timeout(&mut child)?;

        if !status.success() {
            return Err(RenderError::Failed {
                status,
                stderr: read_stderr_excerpt(&stderr_path),
            });
        }
        if !output_path.exists() {
            return Err(RenderError::ArtifactMissing { path: output_path });
        }

        if let Some(parent) = artifact_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&output_path, &artifact_path)?;
        tracing::debug!(artifact = %artifact_path.display(), "persisted model image");

        Ok(RenderedModel {
            digest,
            reference_path,
            artifact_path,
            cached: false,
        })
    }

    /// Reference and artifact paths for a digest.
    fn artifact_paths(&self, digest: &str) -> (String, PathBuf) {
        let filename = format!("{digest}.png");
        let reference_path = format!("{}/{SCAD_SUBDIR}/{filename}", self.img_path_prefix);
        let artifact_path = self
            .out_dir
            .join(&self.images_dir)
            .join(SCAD_SUBDIR)
            .join(&filename);
        (reference_path, artifact_path)
    }

    /// Poll the child until exit or timeout, killing it on expiry.
    fn wait_with_timeout(&self, child: &mut Child) -> Result<ExitStatus, RenderError> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RenderError::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                });
            }
            std::thread::sleep(WAIT_POLL);
        }
    }
}

/// Read a bounded, trimmed excerpt of the captured stderr.
fn read_stderr_excerpt(path: &Path) -> String {
    let raw = fs::read_to_string(path).unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.len() <= STDERR_EXCERPT_LIMIT {
        return trimmed.to_owned();
    }
    let mut end = STDERR_EXCERPT_LIMIT;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
