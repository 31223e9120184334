//! Error handling for mattermost-dl
//!
//! Every fallible operation in the crate returns [`Result`]. The [`ErrorCode`]
//! tells callers which class of failure occurred; only a few are ever handled
//! (team lookups downgrade `NotFound`, attachment downloads retry), everything
//! else aborts the run.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Classes of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Generic/unknown error
    Unknown,
    /// Invalid argument provided
    InvalidArgument,
    /// Network error
    NetworkError,
    /// Authentication failed (bad credentials, unreachable host, no token)
    AuthenticationFailed,
    /// Resource not found
    NotFound,
    /// Permission denied
    PermissionDenied,
    /// Attachment transfer failed
    Transfer,
    /// Malformed interactive input
    Input,
    /// Directory or file could not be created or written
    Filesystem,
    /// Configuration file could not be read or written
    Config,
    /// JSON (de)serialization failed
    Serialization,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::InvalidArgument => "Invalid argument",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::AuthenticationFailed => "Authentication failed",
            ErrorCode::NotFound => "Not found",
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::Transfer => "Transfer failed",
            ErrorCode::Input => "Invalid input",
            ErrorCode::Filesystem => "Filesystem error",
            ErrorCode::Config => "Configuration error",
            ErrorCode::Serialization => "Serialization error",
        }
    }

    /// Map an HTTP status code to the matching error class
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 => ErrorCode::AuthenticationFailed,
            403 => ErrorCode::PermissionDenied,
            404 => ErrorCode::NotFound,
            _ => ErrorCode::NetworkError,
        }
    }
}

/// Crate error type
#[derive(Debug, Clone, Error)]
#[error("{}: {}", .code.as_str(), .message)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    /// Mattermost error ID (e.g. "api.user.login.invalid_credentials")
    pub(crate) mattermost_error_id: Option<String>,
    /// Request ID from the server for debugging
    pub(crate) request_id: Option<String>,
    /// HTTP status code if this error came from an HTTP response
    pub(crate) http_status: Option<u16>,
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Error {
            code,
            message: message.into(),
            mattermost_error_id: None,
            request_id: None,
            http_status: None,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::InvalidArgument, msg)
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::Input, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::NotFound, msg)
    }

    pub fn transfer(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::Transfer, msg)
    }

    pub fn filesystem(msg: impl Into<String>) -> Self {
        Error::new(ErrorCode::Filesystem, msg)
    }

    /// Add Mattermost-specific error ID (builder pattern)
    pub fn with_mattermost_error_id(mut self, id: String) -> Self {
        self.mattermost_error_id = Some(id);
        self
    }

    /// Add request ID for debugging (builder pattern)
    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }

    /// Add HTTP status code (builder pattern)
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Get the Mattermost error ID if available
    pub fn mattermost_error_id(&self) -> Option<&str> {
        self.mattermost_error_id.as_deref()
    }

    /// Get the request ID if available
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Get the HTTP status code if available
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::filesystem(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::new(ErrorCode::Serialization, e.to_string())
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::new(ErrorCode::Unknown, format!("cookie store query failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorCode::NetworkError, "Connection failed");
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(err.message, "Connection failed");
        assert_eq!(err.to_string(), "Network error: Connection failed");
    }

    #[test]
    fn test_error_with_additional_info() {
        let error = Error::new(ErrorCode::NotFound, "Team not found")
            .with_mattermost_error_id("app.team.get.find.app_error".to_string())
            .with_request_id("abc123".to_string())
            .with_http_status(404);

        assert!(error.is_not_found());
        assert_eq!(error.mattermost_error_id(), Some("app.team.get.find.app_error"));
        assert_eq!(error.request_id(), Some("abc123"));
        assert_eq!(error.http_status(), Some(404));
    }

    #[test]
    fn test_error_without_additional_info() {
        let error = Error::new(ErrorCode::Unknown, "Generic error");

        assert_eq!(error.mattermost_error_id(), None);
        assert_eq!(error.request_id(), None);
        assert_eq!(error.http_status(), None);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::from_http_status(401), ErrorCode::AuthenticationFailed);
        assert_eq!(ErrorCode::from_http_status(403), ErrorCode::PermissionDenied);
        assert_eq!(ErrorCode::from_http_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_http_status(500), ErrorCode::NetworkError);
    }

    #[test]
    fn test_io_error_is_filesystem() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: Error = io.into();
        assert_eq!(err.code, ErrorCode::Filesystem);
    }
}
