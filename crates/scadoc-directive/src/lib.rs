//! OpenSCAD block directive parsing for scadoc.
//!
//! This crate turns the body and options of an embedded `scad` block into
//! an immutable [`ScadBlock`] node:
//! - [`ScadOptions`]: the recognized option set and the option/style
//!   strings derived from it
//! - [`ScadBlock`]: the parsed node consumed by the output emitter
//!
//! No rendering happens here; the node only carries the raw model source
//! and the strings the renderer and emitter need later. Option values are
//! passed through unvalidated — the external renderer is the only
//! component that interprets them.

mod block;
mod options;

pub use block::ScadBlock;
pub use options::{DirectiveError, ScadOptions};
