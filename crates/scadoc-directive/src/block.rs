//! The parsed block node.

use crate::ScadOptions;

/// One embedded OpenSCAD block.
///
/// Created once per occurrence at parse time and immutable afterwards;
/// the option and style strings are snapshotted from the directive
/// options so the emitter never needs the option set again.
#[derive(Debug, Clone)]
pub struct ScadBlock {
    /// Raw model source, body lines joined with newlines. Content is
    /// opaque here; only the external renderer interprets it.
    pub source: String,
    /// Flattened OpenSCAD argument string, see
    /// [`ScadOptions::renderer_args`].
    pub renderer_args: String,
    /// CSS-like width/alignment string, see [`ScadOptions::style`].
    pub style: String,
    /// Owning document identifier.
    pub docname: String,
    /// Optional cross-reference label.
    pub label: Option<String>,
}

impl ScadBlock {
    /// Build a block node from the directive body lines and options.
    ///
    /// Lines are joined with `\n` separators; an empty body yields an
    /// empty source string.
    pub fn from_lines<I, S>(lines: I, options: &ScadOptions, docname: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source = lines
            .into_iter()
            .map(|line| line.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            source,
            renderer_args: options.renderer_args(),
            style: options.style(),
            docname: docname.to_owned(),
            label: options.label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_lines_joins_with_newlines() {
        let options = ScadOptions::default();
        let block = ScadBlock::from_lines(
            ["cube(5);", "sphere(2);"],
            &options,
            "models/intro",
        );

        assert_eq!(block.source, "cube(5);\nsphere(2);");
        assert_eq!(block.docname, "models/intro");
    }

    #[test]
    fn test_from_lines_snapshots_option_strings() {
        let options = ScadOptions {
            width: Some("100px".to_owned()),
            camera: Some("0,0,10".to_owned()),
            label: Some("fig-cube".to_owned()),
            ..Default::default()
        };
        let block = ScadBlock::from_lines(["cube(5);"], &options, "doc");

        assert_eq!(block.renderer_args, "--camera=0,0,10 ");
        assert_eq!(block.style, "width=100px");
        assert_eq!(block.label.as_deref(), Some("fig-cube"));
    }

    #[test]
    fn test_from_lines_empty_body() {
        let block = ScadBlock::from_lines::<_, &str>([], &ScadOptions::default(), "doc");
        assert_eq!(block.source, "");
        assert_eq!(block.renderer_args, "");
        assert_eq!(block.style, "");
    }
}
