//! # Common Error Types
//!
//! Consolidated error handling for the chat client.
//!
//! [`AppError`] covers every failure the session store can report. Errors are
//! classified where the HTTP response is decoded (see [`crate::services::api`])
//! so the store only ever sees these variants, never raw status codes.
//!
//! ## Error Categories
//!
//! - **AuthenticationFailed**: login rejected or malformed login body
//! - **Unauthenticated**: an operation that needs a session was called while logged out
//! - **SessionExpired**: the service answered 401 on an authenticated call
//! - **ValidationFailed**: the service rejected the request shape (422)
//! - **RemoteUnavailable**: transport failures, timeouts and other non-2xx answers
//! - **EmptyResponse**: a 2xx answer without a usable payload
//! - **Config**: invalid environment configuration at start-up
//!
//! ## Recovery
//!
//! Nothing here is fatal to a running session. `SessionExpired` is the only
//! variant with a side effect: the store logs out before returning it, so the
//! caller has to go back to the login flow.
//!
//! ```rust
//! use bookchat::core::error::AppError;
//!
//! let err = AppError::RemoteUnavailable("connection refused".to_string());
//! assert_eq!(err.to_string(), "Service unavailable: connection refused");
//! assert!(!err.is_session_expired());
//! ```

use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Bad credentials, `succeeded: false`, or a success body missing the
    /// session data.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// No credentials are held.
    #[error("Not logged in")]
    Unauthenticated,

    /// The bearer token was rejected. The session has been cleared.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// The service rejected the request body.
    #[error("Request rejected: {0}")]
    ValidationFailed(String),

    /// Network failure, timeout, or an unexpected status code.
    #[error("Service unavailable: {0}")]
    RemoteUnavailable(String),

    /// 2xx without a response payload.
    #[error("The service returned an empty response")]
    EmptyResponse,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, AppError::SessionExpired)
    }

    /// Whether the same request may simply be retried by the user.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::RemoteUnavailable(_) | AppError::EmptyResponse
        )
    }

    /// Short text for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthenticationFailed(_) => "Login failed".to_string(),
            AppError::RemoteUnavailable(_) | AppError::EmptyResponse => {
                "Failed to get response.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::RemoteUnavailable(format!("request timed out: {}", err))
        } else if err.is_decode() {
            AppError::EmptyResponse
        } else {
            AppError::RemoteUnavailable(format!("Network error: {}", err))
        }
    }
}
