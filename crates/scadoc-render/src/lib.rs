//! Content-addressed OpenSCAD rendering for scadoc.
//!
//! This crate owns the render-and-cache pipeline:
//! - [`RenderKey`]: digest derivation over model source + renderer options
//! - [`ScadRenderer`]: subprocess invocation of the `openscad` binary with
//!   per-invocation staging and a digest-keyed artifact cache
//! - [`render_all`]: parallel batch rendering with partial results
//!
//! Artifacts land under `<out_dir>/<images_dir>/scad/<digest>.png` and are
//! referenced through a build-relative path of the same shape. An artifact
//! that already exists for a digest is reused without invoking the
//! subprocess, so repeated builds only pay for blocks that changed.

mod batch;
mod consts;
mod digest;
mod error;
mod invoker;

pub use batch::{BlockError, PartialRenderResult, RenderRequest, RenderedBlock, render_all};
pub use consts::{DEFAULT_TIMEOUT_SECS, SCAD_SUBDIR};
pub use digest::RenderKey;
pub use error::RenderError;
pub use invoker::{RenderedModel, ScadRenderer};
