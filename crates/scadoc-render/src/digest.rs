//! Cache key derivation for rendered models.

use sha2::{Digest, Sha256};

/// Render parameters that determine the cached artifact.
///
/// The digest is the cache key and the output filename stem; anything
/// that changes the rendered image must flow into it. The renderer
/// argument string is already order-stable (see the directive crate),
/// so identical (source, options) pairs reproduce identical digests
/// across processes and builds.
#[derive(Debug, Clone, Copy)]
pub struct RenderKey<'a> {
    /// Model source text, body lines joined with newlines.
    pub source: &'a str,
    /// Flattened OpenSCAD argument string.
    pub renderer_args: &'a str,
}

impl RenderKey<'_> {
    /// Compute the content digest for this key.
    ///
    /// SHA-256 over the plain concatenation `source + renderer_args`
    /// (text first, options appended), hex encoded. Two keys whose parts
    /// concatenate to the same string share a cache entry; that aliasing
    /// is an accepted property of the scheme, not worth a structured
    /// encoding.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source.as_bytes());
        hasher.update(self.renderer_args.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Artifact filename for this key: `<digest>.png`.
    #[must_use]
    pub fn artifact_filename(&self) -> String {
        format!("{}.png", self.digest())
    }
}
