//! Client error model.

use thiserror::Error;

/// Form-level failure of a session exchange (login, profile update,
/// password change).
///
/// Carries the message the UI displays. Session operations catch every
/// remote-call failure and translate it into this shape; callers never see
/// an uncaught fault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Transport-classified fault from the remote authority.
///
/// Classification happens exactly once, at the interceptor boundary; call
/// sites never re-inspect status codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The session token was rejected (401-equivalent). Handled centrally by
    /// forcing a logout; never shown as a form error.
    #[error("authorization expired")]
    AuthorizationExpired,

    /// The request was rejected for role reasons (403-equivalent). Surfaced
    /// as a transient notice; the session stays intact.
    #[error("insufficient privilege")]
    InsufficientPrivilege,

    /// The remote authority is failing (5xx-equivalent). Retry is left to
    /// the user.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request was rejected with a displayable message (other 4xx).
    #[error("{0}")]
    Rejected(String),

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Displayable message for form flows.
    ///
    /// Uses the server-supplied message when one exists; everything else
    /// collapses to the caller's generic fallback.
    pub fn into_auth_error(self, fallback: &str) -> AuthError {
        match self {
            ApiError::Rejected(message) if !message.is_empty() => AuthError::new(message),
            _ => AuthError::new(fallback),
        }
    }
}
