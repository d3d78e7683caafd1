//! Environment policy resolution.
//!
//! Every environment-conditional decision of the client is derived here once,
//! from the environment flags, and shared by the transport setup and the
//! fallback adapter.

use crate::config::schema::{BuildMode, EnvironmentConfig};

/// Resolved per-process request policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Serve every call from the synthetic backend without a transport attempt.
    pub use_synthetic: bool,
    /// A failed transport call may be recovered from the synthetic backend.
    pub fallback_eligible: bool,
    /// Base address joined with relative request paths.
    /// Relative (e.g. "/api") when no real backend is in use.
    pub base_address: String,
    /// Whether failures are surfaced to the user.
    pub notify_failures: bool,
}

/// Derive the request policy from environment flags.
///
/// - Developer mode with `use_mock`: synthetic only.
/// - Developer mode otherwise: real transport, fallback on every failure.
/// - Deployed mode: fallback only when no real backend address is configured.
pub fn resolve_policy(env: &EnvironmentConfig) -> Policy {
    let configured = env
        .api_base_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let development = env.mode == BuildMode::Development;
    let use_synthetic = development && env.use_mock;

    let base_address = match (use_synthetic, configured) {
        (false, Some(url)) => url.to_string(),
        _ => env.api_root.clone(),
    };

    Policy {
        use_synthetic,
        fallback_eligible: development || configured.is_none(),
        base_address,
        notify_failures: development,
    }
}

/// True for `http://` and `https://` addresses.
pub fn is_absolute(address: &str) -> bool {
    let lower = address.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(mode: BuildMode, use_mock: bool, url: Option<&str>) -> EnvironmentConfig {
        EnvironmentConfig {
            mode,
            use_mock,
            api_base_url: url.map(String::from),
            ..EnvironmentConfig::default()
        }
    }

    #[test]
    fn test_developer_synthetic_mode() {
        let policy = resolve_policy(&env(BuildMode::Development, true, Some("http://real:8080")));
        assert!(policy.use_synthetic);
        assert!(policy.fallback_eligible);
        assert_eq!(policy.base_address, "/api");
        assert!(!is_absolute(&policy.base_address));
        assert!(policy.notify_failures);
    }

    #[test]
    fn test_developer_with_backend_still_falls_back() {
        let policy = resolve_policy(&env(BuildMode::Development, false, Some("http://real:8080/api")));
        assert!(!policy.use_synthetic);
        assert!(policy.fallback_eligible);
        assert_eq!(policy.base_address, "http://real:8080/api");
        assert!(is_absolute(&policy.base_address));
    }

    #[test]
    fn test_deployed_without_backend() {
        let policy = resolve_policy(&env(BuildMode::Production, false, None));
        assert!(!policy.use_synthetic);
        assert!(policy.fallback_eligible);
        assert_eq!(policy.base_address, "/api");
        assert!(!policy.notify_failures);
    }

    #[test]
    fn test_deployed_with_backend_never_falls_back() {
        let policy = resolve_policy(&env(BuildMode::Production, true, Some("https://api.example.com")));
        // use_mock is a developer switch only
        assert!(!policy.use_synthetic);
        assert!(!policy.fallback_eligible);
    }

    #[test]
    fn test_blank_address_counts_as_missing() {
        let policy = resolve_policy(&env(BuildMode::Production, false, Some("  ")));
        assert!(policy.fallback_eligible);
        assert_eq!(policy.base_address, "/api");
    }
}
