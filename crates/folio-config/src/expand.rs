//! `${VAR}` expansion for string settings.
//!
//! Only the braced form is expanded. `${VAR:-fallback}` supplies a value
//! when `VAR` is unset, and a bare `$VAR` is left alone so that URLs and
//! shell snippets survive untouched.

use crate::ConfigError;

/// Expand environment references in `value`.
///
/// `field` names the setting in error messages, e.g. `distribution.site_url`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional setting in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

struct UnsetVar(String);
