//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{BuildMode, ClientConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable names read by [`apply_env_overrides`].
pub const ENV_MODE: &str = "LOGISTICS_MODE";
pub const ENV_USE_MOCK: &str = "LOGISTICS_USE_MOCK";
pub const ENV_API_BASE_URL: &str = "LOGISTICS_API_BASE_URL";
pub const ENV_MOCK_DELAY_MS: &str = "LOGISTICS_MOCK_DELAY_MS";
pub const ENV_DEPLOY_PREFIX: &str = "LOGISTICS_DEPLOY_PREFIX";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

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

/// Load and validate configuration from a TOML file, then apply env overrides.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ClientConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build configuration from defaults plus the process environment only.
pub fn from_env() -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::default();
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay environment flags on top of a parsed configuration.
///
/// `lookup` abstracts the environment so tests do not touch process state.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let env = &mut config.environment;

    if let Some(mode) = lookup(ENV_MODE) {
        env.mode = mode
            .parse::<BuildMode>()
            .map_err(|reason| ConfigError::Env { name: ENV_MODE, reason })?;
    }

    if let Some(flag) = lookup(ENV_USE_MOCK) {
        // Only the literal "true" enables synthetic mode.
        env.use_mock = flag.trim() == "true";
    }

    if let Some(url) = lookup(ENV_API_BASE_URL) {
        let url = url.trim();
        env.api_base_url = if url.is_empty() { None } else { Some(url.to_string()) };
    }

    if let Some(delay) = lookup(ENV_MOCK_DELAY_MS) {
        env.mock_delay_ms = delay.trim().parse().map_err(|e| ConfigError::Env {
            name: ENV_MOCK_DELAY_MS,
            reason: format!("{}", e),
        })?;
    }

    if let Some(prefix) = lookup(ENV_DEPLOY_PREFIX) {
        let prefix = prefix.trim();
        env.deploy_prefix = if prefix.is_empty() { None } else { Some(prefix.to_string()) };
    }

    Ok(())
}
