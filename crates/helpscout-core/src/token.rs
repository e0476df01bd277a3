//! Access token type.

use std::fmt;

/// A bearer access token for authenticated API requests.
///
/// Tokens are acquired once per run via the client-credentials flow and are
/// not refreshed before expiry; a sync that outlives `expires_in` is a known
/// gap of the upstream design.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_in: u64,
}

impl AccessToken {
    /// Create a new access token with its lifetime in seconds.
    pub fn new(value: impl Into<String>, expires_in: u64) -> Self {
        Self {
            value: value.into(),
            expires_in,
        }
    }

    /// An empty token, used when the run configuration carries no credentials.
    pub fn empty() -> Self {
        Self::new("", 0)
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the token lifetime in seconds, as reported by the server.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.secret", 172800);
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("172800"));
    }

    #[test]
    fn empty_token_has_no_value() {
        let token = AccessToken::empty();
        assert_eq!(token.as_str(), "");
        assert_eq!(token.expires_in(), 0);
    }
}
