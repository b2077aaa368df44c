//! CLI error types.

use eb_config::ConfigError;
use eb_markup::{LocalizeError, LookupError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Localize(#[from] LocalizeError),

    #[error("{0}")]
    Lookup(#[from] LookupError),
}
