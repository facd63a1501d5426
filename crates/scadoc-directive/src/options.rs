//! Recognized directive options and the strings derived from them.

/// Error raised while building a [`ScadOptions`] set.
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// An option key outside the recognized set reached the descriptor.
    #[error("unsupported scad directive option '{key}' (valid: label, name, width, align, camera, axes, autocenter, viewall)")]
    UnsupportedOption {
        /// The offending option key.
        key: String,
    },
}

/// The recognized option set of a `scad` block.
///
/// `autocenter` and `viewall` are presence flags; the remaining options
/// carry string values. Only options that are present contribute to the
/// derived option and style strings — absent options contribute zero
/// characters, never a default.
#[derive(Debug, Clone, Default)]
pub struct ScadOptions {
    /// Cross-reference label.
    pub label: Option<String>,
    /// Target name for the host framework.
    pub name: Option<String>,
    /// Image width, e.g. `200px`.
    pub width: Option<String>,
    /// Image alignment, emitted as `class="align-<value>"`.
    pub align: Option<String>,
    /// Camera position, passed as `--camera=<value>`.
    pub camera: Option<String>,
    /// View options, passed as `--view <value>`.
    pub axes: Option<String>,
    /// Center the model in the view.
    pub autocenter: bool,
    /// Zoom to fit the whole model.
    pub viewall: bool,
}

impl ScadOptions {
    /// Build the option set from `(key, value)` pairs as handed over by
    /// the host framework. Flag options ignore their value.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::UnsupportedOption`] for a key outside
    /// the recognized set.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, DirectiveError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            match key {
                "label" => options.label = Some(value.to_owned()),
                "name" => options.name = Some(value.to_owned()),
                "width" => options.width = Some(value.to_owned()),
                "align" => options.align = Some(value.to_owned()),
                "camera" => options.camera = Some(value.to_owned()),
                "axes" => options.axes = Some(value.to_owned()),
                "autocenter" => options.autocenter = true,
                "viewall" => options.viewall = true,
                _ => {
                    return Err(DirectiveError::UnsupportedOption {
                        key: key.to_owned(),
                    });
                }
            }
        }
        Ok(options)
    }

    /// Flatten the view options into the OpenSCAD argument string.
    ///
    /// The concatenation order (camera, axes, viewall, autocenter) and
    /// the literal flag fragments, trailing spaces included, are part of
    /// the cache-key contract: the render digest is computed over the
    /// model source plus this exact string.
    #[must_use]
    pub fn renderer_args(&self) -> String {
        let mut args = String::new();
        if let Some(camera) = &self.camera {
            args.push_str("--camera=");
            args.push_str(camera);
            args.push(' ');
        }
        if let Some(axes) = &self.axes {
            args.push_str("--view ");
            args.push_str(axes);
            args.push(' ');
        }
        if self.viewall {
            args.push_str("--viewall ");
        }
        if self.autocenter {
            args.push_str("--autocenter");
        }
        args
    }

    /// Build the CSS-like width/alignment string for image embedding.
    #[must_use]
    pub fn style(&self) -> String {
        let mut style = String::new();
        if let Some(width) = &self.width {
            style.push_str("width=");
            style.push_str(width);
        }
        if let Some(align) = &self.align {
            style.push_str(" class=\"align-");
            style.push_str(align);
            style.push('"');
        }
        style
    }
}
