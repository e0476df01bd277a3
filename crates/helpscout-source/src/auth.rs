//! Token acquisition via the client-credentials flow.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use helpscout_core::error::AuthError;
use helpscout_core::{AccessToken, ClientCredentials, Error};

use crate::client::ApiClient;
use crate::Result;

/// Token exchange endpoint, relative to the API base.
const TOKEN_PATH: &str = "oauth2/token";

/// Request body for the token exchange.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Response from the token exchange.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Exchanges client credentials for a bearer access token.
///
/// One POST per run; there is no retry, no caching across runs, and no
/// refresh before expiry.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: ApiClient,
}

impl Authenticator {
    /// Create a new authenticator using the given client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Acquire an access token for the given credentials.
    ///
    /// # Errors
    ///
    /// Fails with [`AuthError::InvalidCredentials`] when either credential
    /// field is empty (no network call is attempted) or when the token
    /// endpoint returns a non-success status. The upstream error body is
    /// deliberately not surfaced.
    #[instrument(skip(self, credentials))]
    pub async fn acquire_token(&self, credentials: &ClientCredentials) -> Result<AccessToken> {
        if !credentials.is_complete() {
            return Err(AuthError::InvalidCredentials(
                "client id or client secret cannot be empty".to_string(),
            )
            .into());
        }

        let request = TokenRequest {
            grant_type: "client_credentials",
            client_id: credentials.client_id(),
            client_secret: credentials.client_secret(),
        };

        let response: TokenResponse = self
            .client
            .post_json(TOKEN_PATH, &request)
            .await
            .map_err(|err| match err {
                Error::Protocol(_) => AuthError::InvalidCredentials(
                    "token endpoint rejected the client credentials".to_string(),
                )
                .into(),
                other => other,
            })?;

        debug!(expires_in = response.expires_in, "access token acquired");

        Ok(AccessToken::new(response.access_token, response.expires_in))
    }
}
