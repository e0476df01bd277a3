//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// The production Help Scout Mailbox API base URL.
const PRODUCTION_BASE: &str = "https://api.helpscout.net/v2";

/// A validated API base URL.
///
/// This type ensures the URL is absolute and properly normalized for
/// endpoint construction. Plain HTTP is accepted so tests can point the
/// connector at a local mock server.
///
/// # Example
///
/// ```
/// use helpscout_core::ApiUrl;
///
/// let base = ApiUrl::production();
/// assert_eq!(base.endpoint("users"), "https://api.helpscout.net/v2/users");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API base URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the URL cannot be parsed or
    /// has no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s)
            .map_err(|e| Error::InvalidInput(format!("invalid API URL '{}': {}", s, e)))?;

        if url.host_str().is_none() {
            return Err(Error::InvalidInput(format!(
                "invalid API URL '{}': missing host",
                s
            )));
        }

        Ok(Self(url))
    }

    /// The fixed production base URL of the Help Scout Mailbox API.
    pub fn production() -> Self {
        Self(Url::parse(PRODUCTION_BASE).expect("production base URL is valid"))
    }

    /// Returns the full URL for a resource path relative to this base.
    pub fn endpoint(&self, path: &str) -> String {
        // The url crate may keep a trailing slash on root paths
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_endpoint_construction() {
        let base = ApiUrl::production();
        assert_eq!(
            base.endpoint("conversations"),
            "https://api.helpscout.net/v2/conversations"
        );
        assert_eq!(
            base.endpoint("teams/42/members"),
            "https://api.helpscout.net/v2/teams/42/members"
        );
    }

    #[test]
    fn http_localhost_is_accepted() {
        let base = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(base.endpoint("users"), "http://127.0.0.1:8080/users");
    }

    #[test]
    fn rejects_urls_without_host() {
        assert!(ApiUrl::new("not a url").is_err());
        assert!(ApiUrl::new("file:///tmp/nope").is_err());
    }
}
