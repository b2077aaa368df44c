//! `${VAR}` references in `encounterbrew.toml` values.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in `value`.
///
/// `$VAR` without braces is kept literally. `field` names the config key in
/// the error raised for an unset variable that has no default.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |var: &str| match std::env::var(var) {
        Ok(found) => Ok(Some(found)),
        Err(_) => Err(UnsetVar(var.to_owned())),
    };
    shellexpand::env_with_context(value, lookup)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        })
}

struct UnsetVar(String);
