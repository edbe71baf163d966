//! Structured errors for backend operations.

use std::fmt;

use serde_json::Value;

/// Categories of backend errors for consistent error handling.
///
/// The categories matter only for diagnostics; every kind collapses to the
/// same user-visible behavior (generic alert or fallback bot message).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Request deadline expired
    Timeout,
    /// Request was sent but no usable response arrived
    Transport,
    /// Request could not be constructed or sent at all
    Build,
    /// Failed to parse a successful response body
    Parse,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendErrorKind::HttpStatus => write!(f, "http_status"),
            BackendErrorKind::Timeout => write!(f, "timeout"),
            BackendErrorKind::Transport => write!(f, "transport"),
            BackendErrorKind::Build => write!(f, "build"),
            BackendErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the backend with kind and details.
#[derive(Debug, Clone)]
pub struct BackendError {
    /// Error category
    pub kind: BackendErrorKind,
    /// One-line summary suitable for logging
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl BackendError {
    /// Creates a new backend error.
    pub fn new(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error.
    ///
    /// The backend reports errors as `{"detail": ...}`; when present, the
    /// detail is lifted into the message.
    pub fn http_status(status: u16, body: &str) -> Self {
        if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(detail) = json.get("detail").and_then(Value::as_str)
        {
            return Self {
                kind: BackendErrorKind::HttpStatus,
                message: format!("HTTP {status}: {detail}"),
                details: Some(body.to_string()),
            };
        }

        Self {
            kind: BackendErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Creates a request-construction error.
    pub fn build(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Build, message)
    }

    /// Classifies a reqwest transport-layer failure.
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::new(BackendErrorKind::Timeout, "Request timed out");
        }
        if err.is_builder() {
            return Self {
                kind: BackendErrorKind::Build,
                message: "Failed to build request".to_string(),
                details: Some(err.to_string()),
            };
        }
        let message = if err.is_connect() {
            "No response received from backend"
        } else {
            "Request failed before a response arrived"
        };
        Self {
            kind: BackendErrorKind::Transport,
            message: message.to_string(),
            details: Some(err.to_string()),
        }
    }

    /// Creates a response-decoding error.
    pub fn parse(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::new(BackendErrorKind::Timeout, "Request timed out");
        }
        Self {
            kind: BackendErrorKind::Parse,
            message: "Failed to decode backend response".to_string(),
            details: Some(err.to_string()),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BackendError {}

/// Result type for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;
