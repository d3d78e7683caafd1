//! Route pattern matching.
//!
//! # Responsibilities
//! - Compile `/orders/:id` style patterns into path segments
//! - Match request method (case-insensitive)
//! - Match a normalized path and extract named parameters
//!
//! # Design Decisions
//! - Patterns are canonicalized with the API root once, at compile time
//! - Exact string comparison first, segment walk second
//! - A parameter captures exactly one non-empty segment, never a `/`
//! - Captured values are percent-decoded; literals compare raw
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;

use reqwest::Method;

use crate::routing::normalize::UrlNormalizer;

/// Named values captured from a matched path.
pub type PathParams = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    canonical: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern, prefixing the normalizer's API root when missing.
    pub fn compile(pattern: &str, normalizer: &UrlNormalizer) -> Self {
        let canonical = normalizer.normalize(pattern);
        let segments = canonical
            .split('/')
            .skip(1)
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) if is_param_name(name) => Segment::Param(name.to_string()),
                _ => Segment::Literal(seg.to_string()),
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            canonical,
            segments,
        }
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The pattern with the API root applied.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Match a normalized path (without query string).
    ///
    /// Returns the captured parameters, empty for a literal match.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        if path == self.canonical {
            return Some(self.literal_params());
        }

        let mut parts = path.strip_prefix('/')?.split('/');
        let mut params = PathParams::new();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode_segment(part));
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// A path equal to the canonical text of a pattern with `:name` segments
    /// still binds them to their literal text.
    fn literal_params(&self) -> PathParams {
        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(self.canonical.split('/').skip(1)) {
            if let Segment::Param(name) = segment {
                params.insert(name.clone(), part.to_string());
            }
        }
        params
    }
}

/// Percent-decode a captured segment, keeping the raw text if it does not
/// decode to UTF-8.
fn decode_segment(part: &str) -> String {
    match urlencoding::decode(part) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => part.to_string(),
    }
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Case-insensitive method comparison.
pub fn method_matches(expected: &Method, actual: &str) -> bool {
    expected.as_str().eq_ignore_ascii_case(actual.trim())
}

/// Parse a method name in any letter case.
pub fn parse_method(method: &str) -> Option<Method> {
    Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes()).ok()
}
