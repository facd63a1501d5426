//! Output emission for rendered scadoc blocks.
//!
//! Converts a parsed [`ScadBlock`](scadoc_directive::ScadBlock) into the
//! final markup for one of the closed set of output formats:
//! - HTML (page-oriented): renders the model and embeds an `<img>`
//!   reference; a failed render degrades to an escaped inline fallback
//!   for that block alone, never aborting the build
//! - LaTeX (print-oriented): passes the model source through as an
//!   inline math literal without invoking the renderer
//!
//! Emission fully consumes the node; a block has no children relevant to
//! further processing.

mod emit;
mod escape;
mod format;

pub use emit::emit_block;
pub use escape::escape_html;
pub use format::OutputFormat;
