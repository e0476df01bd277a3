//! Error types for the Help Scout connector.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, and malformed-response errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for connector operations.
///
/// This error type covers all possible failure modes in the connector,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing or rejected client credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-success HTTP responses from the API).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response body is missing structure the connector relies on.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Input validation errors (invalid base URL).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Client id or client secret missing, or rejected by the token endpoint.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Protocol-level errors carrying the HTTP status of a failed request.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// API error code (if present in the body).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Whether a request failing with this status may be retried.
    ///
    /// 429 (rate limited) and all 5xx statuses are retryable; every other
    /// outcome is not.
    pub fn is_retryable(&self) -> bool {
        self.status == 429 || (500..=599).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_and_server_errors_are_retryable() {
        assert!(ProtocolError::new(429, None, None).is_retryable());
        assert!(ProtocolError::new(500, None, None).is_retryable());
        assert!(ProtocolError::new(503, None, None).is_retryable());
    }

    #[test]
    fn success_and_client_errors_are_not_retryable() {
        assert!(!ProtocolError::new(200, None, None).is_retryable());
        assert!(!ProtocolError::new(400, None, None).is_retryable());
        assert!(!ProtocolError::new(401, None, None).is_retryable());
        assert!(!ProtocolError::new(404, None, None).is_retryable());
    }

    #[test]
    fn protocol_error_display_includes_status_and_message() {
        let err = ProtocolError::new(
            404,
            Some("NotFound".to_string()),
            Some("no such mailbox".to_string()),
        );
        assert_eq!(err.to_string(), "HTTP 404 [NotFound]: no such mailbox");
    }
}
