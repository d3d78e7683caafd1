//! Client error taxonomy.

use std::fmt;

use thiserror::Error;

use crate::storage::StorageError;

/// Classification of a failed call, as shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    Other,
    /// No response was received.
    Network,
}

impl ErrorCategory {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorCategory::Unauthorized,
            403 => ErrorCategory::Forbidden,
            404 => ErrorCategory::NotFound,
            500..=599 => ErrorCategory::ServerError,
            _ => ErrorCategory::Other,
        }
    }

    /// Fixed user-facing text. `Other` has none; the server's message is used.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ErrorCategory::Unauthorized => Some("Unauthorized, please log in again"),
            ErrorCategory::Forbidden => Some("Access denied"),
            ErrorCategory::NotFound => Some("The requested resource does not exist"),
            ErrorCategory::ServerError => Some("Server error"),
            ErrorCategory::Network => Some("Network error, please check your connection"),
            ErrorCategory::Other => None,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Unauthorized => "unauthorized",
            ErrorCategory::Forbidden => "forbidden",
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::ServerError => "server-error",
            ErrorCategory::Other => "other",
            ErrorCategory::Network => "network",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-success HTTP status.
    #[error("HTTP {status} ({category}): {message}")]
    Status {
        status: u16,
        category: ErrorCategory,
        message: String,
    },

    /// No response: connection failure, timeout or no address configured.
    #[error("network error: {0}")]
    Network(String),

    /// The envelope's data did not have the expected shape.
    #[error("unexpected response data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn status(status: u16, server_message: Option<String>) -> Self {
        let category = ErrorCategory::from_status(status);
        let message = category
            .user_message()
            .map(str::to_string)
            .or(server_message)
            .unwrap_or_else(|| "Request failed".to_string());
        ClientError::Status {
            status,
            category,
            message,
        }
    }

    /// `None` for failures that happen before or after the transport.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            ClientError::Status { category, .. } => Some(*category),
            ClientError::Network(_) => Some(ErrorCategory::Network),
            _ => None,
        }
    }

    /// Text suitable for a user-visible notification.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { message, .. } => message.clone(),
            ClientError::Network(_) => ErrorCategory::Network
                .user_message()
                .unwrap_or_default()
                .to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ClientError::status(status.as_u16(), None),
            None => ClientError::Network(e.to_string()),
        }
    }
}
