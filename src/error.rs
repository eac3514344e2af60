//! Error types for the SMS admin server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the SMS admin backend.
#[derive(Error, Debug)]
pub enum AdminApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed or the session expired
    #[error("Authentication failed")]
    Unauthorized,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

impl AdminApiError {
    /// True for 401-class failures, which force a new login instead of being
    /// shown as a form error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// The backend's `error` field, when the failure carried a JSON body with one.
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::ApiError { message, .. } | Self::NotFound(message) => {
                extract_server_error(message)
            }
            Self::InvalidRequest(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// The server's message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}

fn extract_server_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors raised by the durable credential store.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Reading or writing the token file failed
    #[error("Credential file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The token file could not be encoded
    #[error("Credential file encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Errors returned by the phone number form.
#[derive(Error, Debug)]
pub enum FormError {
    /// A submission is already in flight
    #[error("A submission is already in progress")]
    Busy,

    /// The entry index does not exist
    #[error("No entry at position {0}")]
    NoSuchEntry(usize),

    /// The session is no longer valid; the operator must log in again
    #[error("Session expired, please log in again")]
    Auth(#[source] AdminApiError),
}

/// Convenience type alias for Results with AdminApiError
pub type AdminApiResult<T> = Result<T, AdminApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with CredentialError
pub type CredentialResult<T> = Result<T, CredentialError>;
