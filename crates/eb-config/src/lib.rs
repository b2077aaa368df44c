//! Configuration management for Encounterbrew.
//!
//! Parses `encounterbrew.toml` with serde and discovers it in the current
//! directory or its parents. CLI settings are applied during load via
//! [`CliSettings`].
//!
//! ```toml
//! [localization]
//! path = "data/lang/en.json"
//! enabled = true
//!
//! [render]
//! strip_html = true
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `localization.path` supports `${VAR}` (error if unset) and
//! `${VAR:-default}`. Relative paths resolve against the directory holding the
//! config file.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the localization document path.
    pub lang_file: Option<PathBuf>,
    /// Override whether placeholders are localized.
    pub localize: Option<bool>,
    /// Override divider stripping.
    pub strip_html: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "encounterbrew.toml";

/// Default localization document, relative to the base directory.
const DEFAULT_LANG_FILE: &str = "data/lang/en.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Localization section as written in TOML.
    localization: LocalizationConfigRaw,
    /// Rendering options.
    pub render: RenderConfig,

    /// Resolved localization configuration (set after loading).
    #[serde(skip)]
    pub localization_resolved: LocalizationConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LocalizationConfigRaw {
    path: Option<String>,
    enabled: Option<bool>,
}

/// Resolved localization configuration with an absolute document path.
#[derive(Debug, Default)]
pub struct LocalizationConfig {
    /// Localization document (JSON).
    pub path: PathBuf,
    /// Whether `@Localize[...]` placeholders are resolved.
    pub enabled: bool,
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Remove `<hr />` dividers from rendered text.
    pub strip_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { strip_html: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`localization.path`").
        field: String,
        /// Error message (e.g., "${`LANG_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `encounterbrew.toml` in the current directory and parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
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
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(lang_file) = &settings.lang_file {
            self.localization_resolved.path.clone_from(lang_file);
        }
        if let Some(localize) = settings.localize {
            self.localization_resolved.enabled = localize;
        }
        if let Some(strip_html) = settings.strip_html {
            self.render.strip_html = strip_html;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            localization: LocalizationConfigRaw::default(),
            render: RenderConfig::default(),
            localization_resolved: LocalizationConfig {
                path: base.join(DEFAULT_LANG_FILE),
                enabled: true,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values as written in the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if localization is enabled with an
    /// empty document path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let enabled = self.localization.enabled.unwrap_or(true);
        if enabled && self.localization.path.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Validation(
                "localization.path cannot be empty when localization is enabled".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.localization.path {
            self.localization.path = Some(expand::expand_env(path, "localization.path")?);
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let path = self
            .localization
            .path
            .as_deref()
            .unwrap_or(DEFAULT_LANG_FILE);

        self.localization_resolved = LocalizationConfig {
            path: config_dir.join(path),
            enabled: self.localization.enabled.unwrap_or(true),
        };
    }
}
