//! helpscout-source - Help Scout Mailbox source connector.
//!
//! This crate extracts records from the Help Scout Mailbox API and exposes
//! them as paginated record streams. Every resource (users, teams,
//! conversations, mailboxes, ...) shares one request/parse/next-page cycle;
//! the per-resource differences live in the static descriptor catalog of
//! [`helpscout_core`].
//!
//! # Example
//!
//! ```no_run
//! use futures_util::TryStreamExt;
//! use helpscout_source::{ClientCredentials, HelpscoutSource};
//!
//! # async fn example() -> Result<(), helpscout_source::Error> {
//! let credentials = ClientCredentials::new("client-id", "client-secret");
//! let source = HelpscoutSource::new(credentials);
//!
//! for mut stream in source.streams().await? {
//!     while let Some(record) = stream.try_next().await? {
//!         println!("{}: {}", stream.name(), record);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod backoff;
pub mod cache;
pub mod client;
pub mod source;
pub mod stream;

// Re-export primary types at crate root for convenience
pub use auth::Authenticator;
pub use backoff::RetryPolicy;
pub use cache::RunCache;
pub use client::ApiClient;
pub use helpscout_core::{
    AccessToken, ApiUrl, CheckResult, ClientCredentials, Error, PageCursor, StreamDescriptor,
};
pub use source::HelpscoutSource;
pub use stream::RecordStream;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
