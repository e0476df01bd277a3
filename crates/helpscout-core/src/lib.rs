//! helpscout-core - Core types for the Help Scout Mailbox connector.

pub mod catalog;
pub mod check;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod token;
pub mod types;

pub use catalog::{Pagination, Slice, StreamDescriptor, catalog};
pub use check::CheckResult;
pub use credentials::ClientCredentials;
pub use envelope::{PageCursor, PageEnvelope, PageMeta};
pub use error::Error;
pub use token::AccessToken;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
