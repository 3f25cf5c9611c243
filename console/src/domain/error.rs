//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps status codes
//! and transport failures onto them; read queries expose them to views and
//! mutations return them to callers.

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request never produced a usable response.
    Transport,
    /// The request or the server gave up waiting.
    Timeout,
    /// The server rejected the request, usually a validation failure.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested record does not exist.
    NotFound,
    /// The response did not have the shape the endpoint promises.
    UnexpectedShape,
    /// An unexpected error occurred inside the console.
    Internal,
}

impl ErrorCode {
    /// Fallback message used when a failure carries no text of its own.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Transport => "request failed",
            Self::Timeout => "request timed out",
            Self::InvalidRequest => "request rejected",
            Self::Unauthorized => "authentication required",
            Self::Forbidden => "not permitted",
            Self::NotFound => "record not found",
            Self::UnexpectedShape => "unexpected response shape",
            Self::Internal => "internal error",
        }
    }

    /// Classify an HTTP status code.
    ///
    /// Returns `None` for success statuses.
    pub fn from_status(status: u16) -> Option<Self> {
        let code = match status {
            200..=399 => return None,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            400..=499 => Self::InvalidRequest,
            _ => Self::Transport,
        };
        Some(code)
    }
}

/// Failure surfaced by clients, queries, and mutations.
///
/// ## Invariants
/// - `message` is never blank; a blank input is replaced by the code's
///   default message.
///
/// # Examples
/// ```
/// use asset_console::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("asset 7");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "asset 7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            status: None,
        }
    }

    /// Build an error from a non-success HTTP status.
    ///
    /// Success statuses are reported as [`ErrorCode::Internal`] because a
    /// caller only reaches this for responses it already judged failed.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = ErrorCode::from_status(status).unwrap_or(ErrorCode::Internal);
        Self::new(code, message).with_status(status)
    }

    /// Attach the HTTP status that produced the error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status, when the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the failure is a missing record.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Convenience constructor for [`ErrorCode::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Transport, message)
    }

    /// Convenience constructor for [`ErrorCode::Timeout`].
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::UnexpectedShape`].
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnexpectedShape, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
