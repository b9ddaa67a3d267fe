//! Domain error types
//!
//! These errors are transport-agnostic and represent the two failure families a
//! client sees: signing in, and talking to the recommendation backend.

use std::fmt;

/// Failure to establish a session.
///
/// The [`message`](AuthError::message) is what the login form shows in its
/// error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials rejected by the identity provider
    InvalidCredentials(String),
    /// Provider or demo endpoint failure with a readable message
    Provider(String),
    /// No identity provider key configured
    NotConfigured,
}

impl AuthError {
    pub fn message(&self) -> &str {
        match self {
            AuthError::InvalidCredentials(msg) | AuthError::Provider(msg) => msg,
            AuthError::NotConfigured => "Identity provider is not configured.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AuthError {}

/// Failure talking to the backend over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Request could not be sent or the connection failed
    Request(String),
    /// Backend answered with a non-success status
    Status(u16),
    /// Response body was not the expected shape
    Decode(String),
    /// Configured base URL is unusable
    InvalidUrl(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::Request(msg) => write!(f, "Request failed: {}", msg),
            NetworkError::Status(code) => write!(f, "Backend returned status: {}", code),
            NetworkError::Decode(msg) => write!(f, "Malformed response: {}", msg),
            NetworkError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            NetworkError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            NetworkError::Status(status.as_u16())
        } else {
            NetworkError::Request(e.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(e: url::ParseError) -> Self {
        NetworkError::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_banner_text() {
        let err = AuthError::InvalidCredentials("Invalid email or password.".to_string());
        assert_eq!(err.message(), "Invalid email or password.");
        assert_eq!(err.to_string(), "Invalid email or password.");
        assert_eq!(
            AuthError::NotConfigured.message(),
            "Identity provider is not configured."
        );
    }

    #[test]
    fn test_network_error_display() {
        assert_eq!(
            NetworkError::Status(503).to_string(),
            "Backend returned status: 503"
        );
    }
}
