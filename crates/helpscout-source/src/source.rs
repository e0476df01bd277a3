//! Source orchestrator.

use tracing::{debug, instrument};

use helpscout_core::catalog::catalog;
use helpscout_core::{AccessToken, ApiUrl, CheckResult, ClientCredentials};

use crate::auth::Authenticator;
use crate::backoff::RetryPolicy;
use crate::cache::RunCache;
use crate::client::ApiClient;
use crate::stream::RecordStream;
use crate::Result;

/// The Help Scout Mailbox source connector.
///
/// Validates credentials, acquires the access token once, and assembles
/// the record streams handed to the hosting runtime. One instance
/// corresponds to one run; the run cache lives and dies with it.
#[derive(Debug)]
pub struct HelpscoutSource {
    client: ApiClient,
    credentials: ClientCredentials,
    retry: RetryPolicy,
    cache: RunCache,
}

impl HelpscoutSource {
    /// Create a source against the production API.
    pub fn new(credentials: ClientCredentials) -> Self {
        Self::with_base_url(ApiUrl::production(), credentials)
    }

    /// Create a source against an explicit base URL (used by tests).
    pub fn with_base_url(base: ApiUrl, credentials: ClientCredentials) -> Self {
        Self {
            client: ApiClient::new(base),
            credentials,
            retry: RetryPolicy::default(),
            cache: RunCache::new(),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Verify that the configured credentials can reach the API.
    ///
    /// Never returns an error: missing fields and rejected credentials are
    /// both captured as a failure result with a reason.
    #[instrument(skip(self))]
    pub async fn check_connection(&self) -> CheckResult {
        if self.credentials.client_id().is_empty() {
            return CheckResult::failure("client id must be provided");
        }
        if self.credentials.client_secret().is_empty() {
            return CheckResult::failure("client secret must be provided");
        }

        match Authenticator::new(self.client.clone())
            .acquire_token(&self.credentials)
            .await
        {
            Ok(_) => CheckResult::success(),
            Err(err) => CheckResult::failure(err.to_string()),
        }
    }

    /// Assemble the full list of record streams.
    ///
    /// The access token is acquired once and shared by every stream. When
    /// the configuration carries no credentials at all the streams are
    /// built with an empty token, so the catalog can still be enumerated.
    /// A half-filled credential pair is a configuration mistake and goes
    /// through token acquisition, which rejects it.
    ///
    /// # Errors
    ///
    /// Token acquisition failures propagate; they are not converted into a
    /// check-style result here.
    #[instrument(skip(self))]
    pub async fn streams(&self) -> Result<Vec<RecordStream>> {
        let token = if self.credentials.is_empty() {
            AccessToken::empty()
        } else {
            Authenticator::new(self.client.clone())
                .acquire_token(&self.credentials)
                .await?
        };

        let streams: Vec<RecordStream> = catalog()
            .into_iter()
            .map(|descriptor| {
                RecordStream::new(
                    self.client.clone(),
                    descriptor,
                    token.clone(),
                    self.cache.clone(),
                    self.retry.clone(),
                )
            })
            .collect();

        debug!(streams = streams.len(), "stream list assembled");
        Ok(streams)
    }
}
