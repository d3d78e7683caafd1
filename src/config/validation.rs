//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges (timeouts > 0, URLs absolute)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let env = &config.environment;

    if let Some(base) = env.api_base_url.as_deref().filter(|s| !s.trim().is_empty()) {
        match url::Url::parse(base) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError::new(
                "environment.api_base_url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "environment.api_base_url",
                format!("invalid URL '{}': {}", base, e),
            )),
        }
    }

    if !env.api_root.starts_with('/') || env.api_root.len() < 2 || env.api_root.ends_with('/') {
        errors.push(ValidationError::new(
            "environment.api_root",
            "must look like '/segment'",
        ));
    }

    if let Some(prefix) = &env.deploy_prefix {
        if !prefix.starts_with('/') || prefix.ends_with('/') {
            errors.push(ValidationError::new(
                "environment.deploy_prefix",
                "must start with '/' and not end with '/'",
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be > 0"));
    }

    if config.server.bind_address.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.bind_address",
            format!("'{}' is not a socket address", config.server.bind_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.environment.api_base_url = Some("ftp://files.example.com".into());
        config.environment.api_root = "api/".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].to_string().contains("unsupported scheme"));
        assert_eq!(errors[1].field, "environment.api_root");
        assert_eq!(errors[2].field, "timeouts.request_secs");
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let mut config = ClientConfig::default();
        config.environment.api_base_url = Some("/api".into());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "environment.api_base_url");
    }
}
