//! Markup emission per output format.

use scadoc_directive::ScadBlock;
use scadoc_render::ScadRenderer;

use crate::escape::escape_html;
use crate::format::OutputFormat;

/// Emit the final markup for one block in the given output format.
///
/// HTML invokes the renderer and embeds the artifact reference with the
/// block's style attributes. Every render error is caught here and
/// degraded to a visually distinct inline fallback carrying the escaped
/// model source, so a broken block never takes the build down with it.
/// LaTeX emits the source as an inline math literal and never touches
/// the renderer.
#[must_use]
pub fn emit_block(block: &ScadBlock, format: OutputFormat, renderer: &ScadRenderer) -> String {
    match format {
        OutputFormat::Html => emit_html(block, renderer),
        OutputFormat::Latex => emit_latex(block),
    }
}

fn emit_html(block: &ScadBlock, renderer: &ScadRenderer) -> String {
    match renderer.render(&block.source, &block.renderer_args) {
        Ok(model) => format!(r#"<img src="{}" {}/>"#, model.reference_path, block.style),
        Err(error) => {
            tracing::warn!(
                docname = %block.docname,
                %error,
                "model render failed, emitting source fallback"
            );
            format!(
                r#"<span class="scad">{}</span>"#,
                escape_html(block.source.trim())
            )
        }
    }
}

fn emit_latex(block: &ScadBlock) -> String {
    format!("${}$", block.source)
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scadoc_directive::ScadOptions;
    use scadoc_render::RenderKey;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const WRITE_OUTPUT: &str = r#"while [ "$1" != "-o" ]; do shift; done
printf 'fake-png' > "$2""#;

    fn fake_renderer(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-openscad");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn block(source_lines: &[&str], options: &ScadOptions) -> ScadBlock {
        ScadBlock::from_lines(source_lines.iter().copied(), options, "models/demo")
    }

    #[test]
    fn test_html_success_embeds_image_reference() {
        let tmp = TempDir::new().unwrap();
        let binary = fake_renderer(tmp.path(), WRITE_OUTPUT);
        let renderer = ScadRenderer::new(binary, tmp.path().join("out"));

        let options = ScadOptions {
            width: Some("100px".to_owned()),
            ..Default::default()
        };
        let html = emit_block(&block(&["cube(5);"], &options), OutputFormat::Html, &renderer);

        let digest = RenderKey {
            source: "cube(5);",
            renderer_args: "",
        }
        .digest();
        assert_eq!(
            html,
            format!(r#"<img src="_images/scad/{digest}.png" width=100px/>"#)
        );
    }

    #[test]
    fn test_html_failure_emits_escaped_fallback() {
        let tmp = TempDir::new().unwrap();
        let binary = fake_renderer(tmp.path(), "exit 1");
        let renderer = ScadRenderer::new(binary, tmp.path().join("out"));

        let html = emit_block(
            &block(&["cube(<bad>);"], &ScadOptions::default()),
            OutputFormat::Html,
            &renderer,
        );

        assert_eq!(html, r#"<span class="scad">cube(&lt;bad&gt;);</span>"#);
    }

    #[test]
    fn test_html_launch_failure_also_falls_back() {
        let tmp = TempDir::new().unwrap();
        let renderer = ScadRenderer::new(tmp.path().join("no-such-binary"), tmp.path());

        let html = emit_block(
            &block(&["cube(5);"], &ScadOptions::default()),
            OutputFormat::Html,
            &renderer,
        );

        assert!(html.starts_with(r#"<span class="scad">"#));
        assert!(html.contains("cube(5);"));
    }

    #[test]
    fn test_latex_passthrough_without_rendering() {
        let tmp = TempDir::new().unwrap();
        // A renderer that cannot run: proves LaTeX never invokes it.
        let renderer = ScadRenderer::new(tmp.path().join("no-such-binary"), tmp.path());

        let latex = emit_block(
            &block(&["cube(5);"], &ScadOptions::default()),
            OutputFormat::Latex,
            &renderer,
        );

        assert_eq!(latex, "$cube(5);$");
    }

    #[test]
    fn test_latex_multiline_source_preserved() {
        let tmp = TempDir::new().unwrap();
        let renderer = ScadRenderer::new(tmp.path().join("unused"), tmp.path());

        let latex = emit_block(
            &block(&["cube(5);", "sphere(2);"], &ScadOptions::default()),
            OutputFormat::Latex,
            &renderer,
        );

        assert_eq!(latex, "$cube(5);\nsphere(2);$");
    }

    #[test]
    fn test_html_style_omitted_when_empty() {
        let tmp = TempDir::new().unwrap();
        let binary = fake_renderer(tmp.path(), WRITE_OUTPUT);
        let renderer = ScadRenderer::new(binary, tmp.path().join("out"));

        let html = emit_block(
            &block(&["cube(5);"], &ScadOptions::default()),
            OutputFormat::Html,
            &renderer,
        );

        assert!(html.starts_with(r#"<img src="_images/scad/"#));
        assert!(html.ends_with(" />"));
    }

    #[test]
    fn test_html_align_class_carried_into_tag() {
        let tmp = TempDir::new().unwrap();
        let binary = fake_renderer(tmp.path(), WRITE_OUTPUT);
        let renderer = ScadRenderer::new(binary, tmp.path().join("out"));

        let options = ScadOptions {
            width: Some("200px".to_owned()),
            align: Some("center".to_owned()),
            ..Default::default()
        };
        let html = emit_block(&block(&["cube(5);"], &options), OutputFormat::Html, &renderer);

        assert!(html.contains(r#"width=200px class="align-center"/>"#));
    }
}
