//! CLI command implementations.

pub(crate) mod lookup;
pub(crate) mod render;

pub(crate) use lookup::LookupArgs;
pub(crate) use render::RenderArgs;

use std::sync::Arc;

use eb_config::Config;
use eb_markup::Localizer;

use crate::error::CliError;

/// Load the process-wide localizer from the configured document.
fn load_localizer(config: &Config) -> Result<Arc<Localizer>, CliError> {
    let path = &config.localization_resolved.path;
    tracing::info!(path = %path.display(), "Loading localization document");
    Ok(eb_markup::shared_localizer(path)?)
}
