//! Handler fault definitions.

use thiserror::Error;

/// Failure inside a synthetic route handler.
///
/// A fault never reaches the caller as data: the registry reports it and the
/// fallback adapter treats the request as unmatched.
#[derive(Debug, Error)]
pub enum MockError {
    #[error("missing path or query parameter '{0}'")]
    MissingParam(&'static str),

    #[error("request body is required")]
    MissingBody,

    #[error("request body field '{0}' is missing or not a string")]
    MissingField(&'static str),

    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store '{0}' lock poisoned")]
    Poisoned(&'static str),
}

/// Result type for synthetic handlers.
pub type MockResult<T> = Result<T, MockError>;
