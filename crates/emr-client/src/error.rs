//! Client Errors
//!
//! Every failure a page can observe from the API layer.

use serde_json::Value;

pub type ApiResult<T> = Result<T, ApiError>;

/// Shown when a 403 carries no server message
pub const FORBIDDEN_FALLBACK: &str = "Anda tidak memiliki izin untuk melakukan tindakan ini";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized: {}", .message.as_deref().unwrap_or("session expired"))]
    Unauthorized { message: Option<String> },

    #[error("Forbidden: {}", .message.as_deref().unwrap_or("permission denied"))]
    Forbidden { message: Option<String> },

    #[error("Not found: {}", .message.as_deref().unwrap_or("resource not found"))]
    NotFound { message: Option<String> },

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Status { status: u16, message: Option<String> },

    /// Network failure, timeout, or a request the browser refused to send
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Map a non-success status and its JSON body to an error
    pub fn from_status(status: u16, body: &Value) -> Self {
        let message = server_message(body);
        match status {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            _ => ApiError::Status { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden { .. })
    }

    /// Message the server attached to the response, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::NotFound { message }
            | ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a user-facing notice: the server message when present,
    /// otherwise `fallback` (or the permission-denied text for a 403).
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message() {
            return message.to_string();
        }
        if self.is_forbidden() {
            return FORBIDDEN_FALLBACK.to_string();
        }
        fallback.to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Pull `message` (or `error`) out of an error body
pub fn server_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
