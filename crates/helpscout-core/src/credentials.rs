//! Client credentials type.

use serde::Deserialize;
use std::fmt;

/// OAuth client credentials for the Help Scout Mailbox API.
///
/// This type holds the client id and client secret exchanged for an access
/// token via the client-credentials flow. It doubles as the connector's run
/// configuration: both fields deserialize from the hosting framework's
/// config object and default to empty strings when absent.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use helpscout_core::ClientCredentials;
///
/// let creds = ClientCredentials::new("my-client-id", "my-client-secret");
/// assert_eq!(creds.client_id(), "my-client-id");
/// assert!(creds.is_complete());
/// ```
#[derive(Clone, Default, Deserialize)]
pub struct ClientCredentials {
    #[serde(default)]
    client_id: String,
    #[serde(default)]
    client_secret: String,
}

impl ClientCredentials {
    /// Create new credentials.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Returns the client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing the token exchange request.
    /// Never log or display this value.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Whether both credential fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// Whether neither credential field was supplied.
    ///
    /// Configs without credentials deserialize to empty strings, so an
    /// entirely empty pair is treated as "no credentials configured" while
    /// a half-filled pair is treated as a configuration mistake.
    pub fn is_empty(&self) -> bool {
        self.client_id.is_empty() && self.client_secret.is_empty()
    }
}

// Intentionally hide the secret in Debug output
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
