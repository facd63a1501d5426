//! CLI error types.

use scadoc_config::ConfigError;
use scadoc_directive::DirectiveError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Directive(#[from] DirectiveError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
