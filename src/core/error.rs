//! Error taxonomy for the API client
//!
//! The session core resolves authorization failures only. Every other
//! failure is carried to the calling view unchanged, including the
//! response body the server sent.

use serde_json::Value;

use crate::core::session::StorageError;

/// Errors surfaced by the session manager, the gateway and the resource API
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request rejected with status {status}")]
    Validation { status: u16, body: Value },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Server error (status {status})")]
    Server { status: u16, body: Value },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown user role code: {0}")]
    UnknownRole(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Build the error for a non-2xx response that reached the caller
    pub fn from_status(status: u16, body: Value) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            400..=499 => ApiError::Validation { status, body },
            _ => ApiError::Server { status, body },
        }
    }

    /// True when the session was torn down while handling this error
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }

    /// HTTP status behind this error, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing next to a form.
    ///
    /// Validation bodies from the API look like `{"field": ["message"]}` or
    /// `{"detail": "message"}`; the first message found wins.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::InvalidCredentials => {
                "Could not sign in. Check your username and password.".to_string()
            }
            ApiError::Validation { body, .. } => {
                first_message(body).unwrap_or_else(|| "The request was rejected".to_string())
            }
            ApiError::Network(_) => "Network error. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

fn first_message(body: &Value) -> Option<String> {
    match body {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        Value::Object(fields) => fields.values().find_map(first_message),
        _ => None,
    }
}
