//! Parallel batch rendering.
//!
//! Renders independent blocks on the rayon thread pool, collecting
//! partial results: successfully rendered blocks are returned even when
//! others fail. Per-invocation staging directories make concurrent
//! renders safe, and artifact writes are idempotent per digest.

use rayon::prelude::*;

use crate::error::RenderError;
use crate::invoker::{RenderedModel, ScadRenderer};

/// One block queued for batch rendering.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Position of the block in document-traversal order.
    pub index: usize,
    /// Model source text.
    pub source: String,
    /// Flattened OpenSCAD argument string.
    pub renderer_args: String,
}

impl RenderRequest {
    /// Create a new render request.
    pub fn new(index: usize, source: impl Into<String>, renderer_args: impl Into<String>) -> Self {
        Self {
            index,
            source: source.into(),
            renderer_args: renderer_args.into(),
        }
    }
}

/// A successfully rendered block in a batch.
#[derive(Debug)]
pub struct RenderedBlock {
    /// Index matching the original request.
    pub index: usize,
    /// The rendered model image.
    pub model: RenderedModel,
}

/// Rendering error tagged with the originating block index.
#[derive(Debug, thiserror::Error)]
#[error("block {index}: {error}")]
pub struct BlockError {
    /// Index matching the original request.
    pub index: usize,
    /// The underlying render error.
    pub error: RenderError,
}

/// Result of rendering a batch with partial failures.
#[derive(Debug)]
pub struct PartialRenderResult {
    /// Successfully rendered blocks.
    pub rendered: Vec<RenderedBlock>,
    /// Errors for blocks that failed to render.
    pub errors: Vec<BlockError>,
}

/// Render all blocks in parallel, returning partial results.
///
/// Uses the global rayon thread pool. Failed blocks show up in
/// `errors` with their request index; the rest render normally.
#[must_use]
pub fn render_all(renderer: &ScadRenderer, requests: &[RenderRequest]) -> PartialRenderResult {
    if requests.is_empty() {
        return PartialRenderResult {
            rendered: Vec::new(),
            errors: Vec::new(),
        };
    }

    let results: Vec<Result<RenderedBlock, BlockError>> = requests
        .par_iter()
        .map(|request| {
            renderer
                .render(&request.source, &request.renderer_args)
                .map(|model| RenderedBlock {
                    index: request.index,
                    model,
                })
                .map_err(|error| BlockError {
                    index: request.index,
                    error,
                })
        })
        .collect();

    partition_results(results)
}

/// Partition per-block results into successes and failures.
fn partition_results(results: Vec<Result<RenderedBlock, BlockError>>) -> PartialRenderResult {
    let mut rendered = Vec::with_capacity(results.len());
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(block) => rendered.push(block),
            Err(error) => errors.push(error),
        }
    }

    PartialRenderResult { rendered, errors }
}
