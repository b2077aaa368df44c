//! `eb render` command implementation.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use eb_config::{CliSettings, Config};
use eb_markup::{RenderOptions, render_description};

use super::load_localizer;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Description text (read from stdin when omitted).
    text: Vec<String>,

    /// Path to configuration file (default: auto-discover encounterbrew.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Localization document (overrides config).
    #[arg(short, long, env = "EB_LANG_FILE")]
    lang_file: Option<PathBuf>,

    /// Leave `@Localize[...]` placeholders to the rewriter fallback.
    #[arg(long)]
    no_localize: bool,

    /// Keep `<hr />` dividers in the output.
    #[arg(long)]
    keep_html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input, or the localization document
    /// cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            lang_file: self.lang_file,
            localize: self.no_localize.then_some(false),
            strip_html: self.keep_html.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let text = if self.text.is_empty() {
            read_input(std::io::stdin().lock())?
        } else {
            self.text.join(" ")
        };

        let localizer = if config.localization_resolved.enabled {
            Some(load_localizer(&config)?)
        } else {
            if text.contains("@Localize[") {
                output.warning("Localization disabled; placeholders fall back to their key names");
            }
            None
        };

        let options = RenderOptions {
            strip_html: config.render.strip_html,
        };
        let rendered = render_description(&text, localizer.as_deref(), options);
        output.result(&rendered)?;

        Ok(())
    }
}

/// Read the whole input, dropping one trailing line break.
fn read_input(mut reader: impl Read) -> Result<String, CliError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let trimmed = text
        .strip_suffix('\n')
        .map_or(text.as_str(), |t| t.strip_suffix('\r').unwrap_or(t));
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_input_drops_final_newline() {
        let text = read_input("@Check[arcana|dc:40]\n".as_bytes()).unwrap();
        assert_eq!(text, "@Check[arcana|dc:40]");
    }

    #[test]
    fn test_read_input_keeps_inner_newlines() {
        let text = read_input("line one\n\nline two\r\n".as_bytes()).unwrap();
        assert_eq!(text, "line one\n\nline two");
    }

    #[test]
    fn test_read_input_empty() {
        assert_eq!(read_input(&b""[..]).unwrap(), "");
    }
}
