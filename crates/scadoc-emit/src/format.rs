//! Output format selection.

/// The closed set of output targets.
///
/// The two formats deliberately diverge in what they emit: `Html`
/// embeds a rendered raster image, `Latex` passes the model source
/// through as literal text. Unifying them would change observable
/// print output, so the divergence is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Page-oriented output supporting raster image embedding.
    Html,
    /// Print-oriented output using math-delimited literal passthrough.
    Latex,
}
