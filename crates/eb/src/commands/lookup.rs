//! `eb lookup` command implementation.

use std::path::PathBuf;

use clap::Args;
use eb_config::{CliSettings, Config};

use super::load_localizer;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lookup command.
#[derive(Args)]
pub(crate) struct LookupArgs {
    /// Dot-separated path, e.g. `PF2E.NPC.Abilities.Glossary.Grab`.
    path: String,

    /// Path to configuration file (default: auto-discover encounterbrew.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Localization document (overrides config).
    #[arg(short, long, env = "EB_LANG_FILE")]
    lang_file: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl LookupArgs {
    /// Execute the lookup command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded or the path does not
    /// lead to a text value.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            lang_file: self.lang_file,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let localizer = load_localizer(&config)?;
        output.info(&format!("Document: {}", localizer.origin()));

        let text = localizer.lookup(&self.path)?;
        output.result(&text)?;

        Ok(())
    }
}
