//! URL normalization.
//!
//! Collapses every address form a caller may produce (absolute, relative,
//! with or without a deployment sub-path) onto one canonical path that starts
//! with the API root, so that registry patterns only need one spelling.

/// Normalizes request URLs onto the canonical API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlNormalizer {
    api_root: String,
    deploy_prefix: Option<String>,
}

impl Default for UrlNormalizer {
    fn default() -> Self {
        Self::new("/api", None)
    }
}

impl UrlNormalizer {
    /// Create a normalizer for the given API root (e.g. "/api") and optional
    /// deployment prefix (e.g. "/portal").
    pub fn new(api_root: impl Into<String>, deploy_prefix: Option<String>) -> Self {
        Self {
            api_root: api_root.into(),
            deploy_prefix: deploy_prefix.filter(|p| !p.is_empty()),
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// Normalize a raw URL. Never fails; idempotent.
    ///
    /// Any query string is preserved verbatim.
    pub fn normalize(&self, raw: &str) -> String {
        let mut url = strip_origin(raw.trim());

        if let Some(prefix) = &self.deploy_prefix {
            if let Some(rest) = url.strip_prefix(prefix.as_str()) {
                if starts_with_segment(rest, &self.api_root) {
                    url = rest;
                }
            }
        }

        if starts_with_segment(url, &self.api_root) {
            return url.to_string();
        }

        if url.is_empty() || url.starts_with('?') {
            format!("{}{}", self.api_root, url)
        } else if url.starts_with('/') {
            format!("{}{}", self.api_root, url)
        } else {
            format!("{}/{}", self.api_root, url)
        }
    }
}

/// Remove a leading `scheme://host[:port]`.
fn strip_origin(url: &str) -> &str {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    let after_scheme = if lower.starts_with("http://") {
        &url[7..]
    } else if lower.starts_with("https://") {
        &url[8..]
    } else {
        return url;
    };

    match after_scheme.find(|c| c == '/' || c == '?') {
        Some(idx) => &after_scheme[idx..],
        None => "",
    }
}

/// `url` starts with `segment` on a path-segment boundary.
fn starts_with_segment(url: &str, segment: &str) -> bool {
    match url.strip_prefix(segment) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Split a normalized URL into its path and optional query string.
pub fn split_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal() -> UrlNormalizer {
        UrlNormalizer::new("/api", Some("/portal".to_string()))
    }

    #[test]
    fn test_strips_scheme_and_host() {
        let n = UrlNormalizer::default();
        assert_eq!(n.normalize("http://example.com/api/orders"), "/api/orders");
        assert_eq!(n.normalize("https://example.com:8443/api/orders/ORD1"), "/api/orders/ORD1");
        assert_eq!(n.normalize("HTTPS://EXAMPLE.COM/orders"), "/api/orders");
        assert_eq!(n.normalize("http://example.com"), "/api");
    }

    #[test]
    fn test_strips_deploy_prefix() {
        let n = portal();
        assert_eq!(n.normalize("/portal/api/orders"), "/api/orders");
        assert_eq!(n.normalize("https://host/portal/api/vessels/VES001/ais"), "/api/vessels/VES001/ais");
        // Prefix only counts in front of the API root.
        assert_eq!(n.normalize("/portal/orders"), "/api/portal/orders");
    }

    #[test]
    fn test_prepends_api_root() {
        let n = UrlNormalizer::default();
        assert_eq!(n.normalize("/orders"), "/api/orders");
        assert_eq!(n.normalize("orders/ORD1"), "/api/orders/ORD1");
        assert_eq!(n.normalize(""), "/api");
        assert_eq!(n.normalize("/apiary"), "/api/apiary");
    }

    #[test]
    fn test_keeps_query() {
        let n = UrlNormalizer::default();
        assert_eq!(n.normalize("http://h/api/orders?page=2"), "/api/orders?page=2");
        assert_eq!(n.normalize("/orders?status=pending"), "/api/orders?status=pending");
    }

    #[test]
    fn test_idempotent() {
        let n = portal();
        for raw in [
            "http://example.com/portal/api/orders/ORD1",
            "orders",
            "/api",
            "",
            "/portal/orders",
            "https://h/tracking/timeline?orderId=ORD1",
        ] {
            let once = n.normalize(raw);
            assert_eq!(n.normalize(&once), once, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/api/orders?page=1"), ("/api/orders", Some("page=1")));
        assert_eq!(split_query("/api/orders"), ("/api/orders", None));
    }
}
