//! Configuration loading from disk and environment.

use std::fmt;
use std::fs;
use std::num::ParseIntError;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::logging::LogLevel;

/// Environment variable selecting the listening port.
pub const PORT_VAR: &str = "PORT";

/// Environment variable selecting the minimum emitted level.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration (no validation).
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read and parse a TOML file (no validation).
pub fn read_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    parse_config(&fs::read_to_string(path)?)
}

/// Apply `PORT` and `LOG_LEVEL` overrides using `lookup` to read variables.
///
/// Unset or empty variables leave the configuration untouched.
pub fn apply_env_overrides<F>(
    mut config: ServiceConfig,
    lookup: F,
) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PORT_VAR).filter(|v| !v.trim().is_empty()) {
        config.listener.port = value
            .trim()
            .parse()
            .map_err(|e: ParseIntError| env_error(PORT_VAR, &value, e))?;
    }

    if let Some(value) = lookup(LOG_LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
        config.logging.level = value
            .parse::<LogLevel>()
            .map_err(|e| env_error(LOG_LEVEL_VAR, &value, e))?;
    }

    Ok(config)
}

fn env_error(var: &'static str, value: &str, reason: impl fmt::Display) -> ConfigError {
    ConfigError::Env {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolve the effective configuration from the process environment.
pub fn load(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    load_with(path, |var| std::env::var(var).ok())
}

/// File (or defaults) → environment overrides via `lookup` → validation.
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    let config = apply_env_overrides(config, lookup)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
