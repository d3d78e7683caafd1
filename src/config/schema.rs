//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the logistics client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Build mode, backend address and synthetic-mode switches.
    pub environment: EnvironmentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Persisted key-value store settings.
    pub storage: StorageConfig,

    /// Developer mock server settings.
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Build mode of the running client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Interactive/developer mode. Synthetic-only when `use_mock` is set.
    #[default]
    Development,
    /// Deployed build.
    Production,
}

impl std::str::FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            other => Err(format!("unknown build mode '{}'", other)),
        }
    }
}

/// Environment flags consumed by the policy resolver.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Developer or deployed build.
    pub mode: BuildMode,

    /// Serve every call from the in-process emulation (developer mode only).
    pub use_mock: bool,

    /// Real backend address (e.g., "https://api.example.com/api").
    pub api_base_url: Option<String>,

    /// Simulated latency applied to synthetic responses, in milliseconds.
    pub mock_delay_ms: u64,

    /// Canonical API root segment every normalized URL starts with.
    pub api_root: String,

    /// Deployment sub-path stripped in front of the API root (e.g., "/portal").
    pub deploy_prefix: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::Development,
            use_mock: false,
            api_base_url: None,
            mock_delay_ms: 300,
            api_root: "/api".to_string(),
            deploy_prefix: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Persisted key-value store configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file backing the store. In-memory only when unset.
    pub path: Option<String>,
}

/// Developer mock server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
