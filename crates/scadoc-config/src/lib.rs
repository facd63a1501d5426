//! Configuration management for scadoc.
//!
//! Parses `scadoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "scadoc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// Override the renderer binary.
    pub binary: Option<PathBuf>,
    /// Override the render timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Override the force re-render flag.
    pub force: Option<bool>,
    /// Override the build output directory.
    pub out_dir: Option<PathBuf>,
}

impl CliSettings {
    /// Check if all override fields are None (no overrides specified).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binary.is_none()
            && self.timeout_secs.is_none()
            && self.force.is_none()
            && self.out_dir.is_none()
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Renderer configuration as parsed from TOML.
    renderer: RendererConfigRaw,
    /// Build layout configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved renderer configuration (set after loading).
    #[serde(skip)]
    pub renderer_resolved: RendererConfig,
    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw renderer configuration as parsed from TOML.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RendererConfigRaw {
    binary: Option<String>,
    timeout_secs: Option<u64>,
    force: Option<bool>,
}

/// Resolved renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Renderer executable, a name resolved on `PATH` or a path.
    pub binary: PathBuf,
    /// Subprocess timeout in seconds.
    pub timeout_secs: u64,
    /// Re-render even when a cached artifact exists.
    pub force: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("openscad"),
            timeout_secs: 60,
            force: false,
        }
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    out_dir: Option<String>,
    images_dir: Option<String>,
    img_path_prefix: Option<String>,
}

/// Resolved build layout configuration.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Build output directory, resolved against the config location.
    pub out_dir: PathBuf,
    /// Image directory name under the build output directory.
    pub images_dir: String,
    /// Build-relative prefix used in emitted image references.
    pub img_path_prefix: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("_build/html"),
            images_dir: "_images".to_owned(),
            img_path_prefix: "_images".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `scadoc.toml` in the current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution,
    /// allowing CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(binary) = &settings.binary {
            self.renderer_resolved.binary.clone_from(binary);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.renderer_resolved.timeout_secs = timeout_secs;
        }
        if let Some(force) = settings.force {
            self.renderer_resolved.force = force;
        }
        if let Some(out_dir) = &settings.out_dir {
            self.build_resolved.out_dir.clone_from(out_dir);
        }
    }

    /// Search for a config file in the current directory and parents.
    #[must_use]
    pub fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create a default config with paths relative to the current
    /// working directory.
    #[must_use]
    pub fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create a default config with paths relative to the given base
    /// directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            renderer: RendererConfigRaw::default(),
            build: BuildConfigRaw::default(),
            renderer_resolved: RendererConfig::default(),
            build_resolved: BuildConfig {
                out_dir: base.join("_build/html"),
                ..BuildConfig::default()
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on the config
    /// directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let defaults_renderer = RendererConfig::default();
        self.renderer_resolved = RendererConfig {
            binary: self
                .renderer
                .binary
                .as_deref()
                .map_or(defaults_renderer.binary, PathBuf::from),
            timeout_secs: self
                .renderer
                .timeout_secs
                .unwrap_or(defaults_renderer.timeout_secs),
            force: self.renderer.force.unwrap_or(defaults_renderer.force),
        };

        let defaults_build = BuildConfig::default();
        self.build_resolved = BuildConfig {
            out_dir: config_dir.join(self.build.out_dir.as_deref().unwrap_or("_build/html")),
            images_dir: self
                .build
                .images_dir
                .clone()
                .unwrap_or(defaults_build.images_dir),
            img_path_prefix: self
                .build
                .img_path_prefix
                .clone()
                .unwrap_or(defaults_build.img_path_prefix),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.renderer_resolved.binary, PathBuf::from("openscad"));
        assert_eq!(config.renderer_resolved.timeout_secs, 60);
        assert!(!config.renderer_resolved.force);
        assert_eq!(
            config.build_resolved.out_dir,
            PathBuf::from("/test/_build/html")
        );
        assert_eq!(config.build_resolved.images_dir, "_images");
        assert_eq!(config.build_resolved.img_path_prefix, "_images");
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.renderer_resolved.binary, PathBuf::from("openscad"));
        assert_eq!(
            config.build_resolved.out_dir,
            PathBuf::from("/project/_build/html")
        );
    }

    #[test]
    fn test_parse_renderer_config() {
        let toml = r#"
[renderer]
binary = "/opt/openscad/bin/openscad"
timeout_secs = 120
force = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.renderer_resolved.binary,
            PathBuf::from("/opt/openscad/bin/openscad")
        );
        assert_eq!(config.renderer_resolved.timeout_secs, 120);
        assert!(config.renderer_resolved.force);
    }

    #[test]
    fn test_parse_build_config() {
        let toml = r#"
[build]
out_dir = "_build/site"
images_dir = "img"
img_path_prefix = "../img"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.build_resolved.out_dir,
            PathBuf::from("/project/_build/site")
        );
        assert_eq!(config.build_resolved.images_dir, "img");
        assert_eq!(config.build_resolved.img_path_prefix, "../img");
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config_path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[build]\nout_dir = \"out\"\n").unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();
        assert_eq!(config.build_resolved.out_dir, tmp.path().join("out"));
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/no/such/scadoc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_apply_cli_settings_binary() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            binary: Some(PathBuf::from("/usr/bin/openscad-nightly")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.renderer_resolved.binary,
            PathBuf::from("/usr/bin/openscad-nightly")
        );
        assert_eq!(config.renderer_resolved.timeout_secs, 60); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_force_and_timeout() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            timeout_secs: Some(5),
            force: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.renderer_resolved.timeout_secs, 5);
        assert!(config.renderer_resolved.force);
    }

    #[test]
    fn test_apply_cli_settings_out_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            out_dir: Some(PathBuf::from("/custom/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.out_dir, PathBuf::from("/custom/out"));
        assert_eq!(config.build_resolved.images_dir, "_images"); // Unchanged
    }

    #[test]
    fn test_cli_settings_is_empty() {
        assert!(CliSettings::default().is_empty());

        assert!(
            !CliSettings {
                force: Some(true),
                ..Default::default()
            }
            .is_empty()
        );

        assert!(
            !CliSettings {
                out_dir: Some(PathBuf::from("/out")),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
