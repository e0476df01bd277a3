//! Paginated record streams.
//!
//! One [`RecordStream`] per catalog descriptor, all sharing the same
//! request/parse/next-page cycle. Child streams run a two-phase pipeline:
//! the parent collection is fully materialized first, then the child
//! endpoint is paginated once per parent record. Keeping that boundary
//! explicit leaves room to stream parents later instead of materializing
//! them.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_stream::try_stream;
use futures_core::Stream;
use futures_util::TryStreamExt;
use serde_json::Value;
use tracing::{debug, warn};

use helpscout_core::catalog::{Pagination, Slice, StreamDescriptor};
use helpscout_core::envelope::{PageCursor, PageEnvelope};
use helpscout_core::error::Error;
use helpscout_core::AccessToken;

use crate::backoff::RetryPolicy;
use crate::cache::RunCache;
use crate::client::ApiClient;
use crate::Result;

/// A lazy stream of records for one resource.
///
/// Yields `Result<serde_json::Value>` page by page; records are passed
/// through exactly as decoded, with no transformation.
pub struct RecordStream {
    descriptor: &'static StreamDescriptor,
    inner: Pin<Box<dyn Stream<Item = Result<Value>> + Send>>,
}

impl RecordStream {
    pub(crate) fn new(
        client: ApiClient,
        descriptor: &'static StreamDescriptor,
        token: AccessToken,
        cache: RunCache,
        retry: RetryPolicy,
    ) -> Self {
        let inner = try_stream! {
            if descriptor.cache_results {
                // Cached resources are read through the run cache so child
                // streams slicing over them reuse the same record list.
                let records = cached_collection(&client, &retry, descriptor, &token, &cache).await?;
                for record in records.iter().cloned() {
                    yield record;
                }
            } else {
                // Phase one: one slice per parent record; leaf streams read
                // a single unsliced pass.
                let slices: Vec<Option<Slice>> = match descriptor.parent {
                    Some(parent) => {
                        let parents =
                            cached_collection(&client, &retry, parent, &token, &cache).await?;
                        collect_slices(parent, &parents)?
                            .into_iter()
                            .map(Some)
                            .collect()
                    }
                    None => vec![None],
                };

                // Phase two: paginate the endpoint per slice.
                for slice in slices {
                    let mut cursor: Option<PageCursor> = None;
                    loop {
                        let path = descriptor.request_path(slice.as_ref(), cursor.as_ref());
                        let envelope = fetch_page(&client, &retry, &path, &token).await?;

                        for record in envelope.records(descriptor.model)? {
                            yield record;
                        }

                        cursor = match descriptor.pagination {
                            Pagination::SinglePage => None,
                            Pagination::PageSuffix => envelope.next_cursor()?,
                        };
                        if cursor.is_none() {
                            break;
                        }
                    }
                }
            }
        };

        Self {
            descriptor,
            inner: Box::pin(inner),
        }
    }

    /// Stream name, as surfaced to the hosting framework.
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Primary-key field name for this stream's records.
    pub fn primary_key(&self) -> &'static str {
        self.descriptor.primary_key
    }

    /// The descriptor this stream was built from.
    pub fn descriptor(&self) -> &'static StreamDescriptor {
        self.descriptor
    }

    /// Drain the stream into a vector.
    pub async fn read_all(self) -> Result<Vec<Value>> {
        self.try_collect().await
    }
}

impl Stream for RecordStream {
    type Item = Result<Value>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("descriptor", &self.descriptor.name)
            .finish_non_exhaustive()
    }
}

/// Fetch one page, retrying retryable protocol failures per the policy.
async fn fetch_page(
    client: &ApiClient,
    retry: &RetryPolicy,
    path: &str,
    token: &AccessToken,
) -> Result<PageEnvelope> {
    let mut attempt = 0;
    loop {
        match client.get_authed::<PageEnvelope>(path, token).await {
            Err(Error::Protocol(err)) if err.is_retryable() && attempt < retry.max_retries => {
                attempt += 1;
                let delay = retry.delay_for_attempt(attempt);
                warn!(
                    path,
                    status = err.status,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after retryable response"
                );
                tokio::time::sleep(delay).await;
            }
            other => return other,
        }
    }
}

/// Materialize the full record list for a collection endpoint.
async fn read_collection(
    client: &ApiClient,
    retry: &RetryPolicy,
    descriptor: &'static StreamDescriptor,
    token: &AccessToken,
) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    let mut cursor: Option<PageCursor> = None;

    loop {
        let path = descriptor.request_path(None, cursor.as_ref());
        let envelope = fetch_page(client, retry, &path, token).await?;
        records.extend(envelope.records(descriptor.model)?);

        cursor = match descriptor.pagination {
            Pagination::SinglePage => None,
            Pagination::PageSuffix => envelope.next_cursor()?,
        };
        if cursor.is_none() {
            break;
        }
    }

    debug!(resource = descriptor.name, records = records.len(), "collection read");
    Ok(records)
}

/// Read a collection through the run cache when the descriptor opts in.
async fn cached_collection(
    client: &ApiClient,
    retry: &RetryPolicy,
    descriptor: &'static StreamDescriptor,
    token: &AccessToken,
    cache: &RunCache,
) -> Result<Arc<Vec<Value>>> {
    if descriptor.cache_results {
        if let Some(hit) = cache.get(descriptor.name).await {
            debug!(resource = descriptor.name, "run cache hit");
            return Ok(hit);
        }
    }

    let records = read_collection(client, retry, descriptor, token).await?;

    if descriptor.cache_results {
        Ok(cache.put(descriptor.name, records).await)
    } else {
        Ok(Arc::new(records))
    }
}

/// Produce one slice per parent record.
fn collect_slices(parent: &StreamDescriptor, records: &[Value]) -> Result<Vec<Slice>> {
    records
        .iter()
        .map(|record| {
            let id = record.get("id").cloned().ok_or_else(|| {
                Error::MalformedResponse(format!(
                    "`{}` record is missing the `id` field",
                    parent.name
                ))
            })?;
            Ok(Slice::new(id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn one_slice_per_parent_record() {
        let records = vec![json!({"id": 42}), json!({"id": 43})];
        let slices = collect_slices(&helpscout_core::catalog::TEAMS, &records).unwrap();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0], Slice::new(json!(42)));
    }

    #[test]
    fn parent_record_without_id_is_malformed() {
        let records = vec![json!({"name": "no id here"})];
        let err = collect_slices(&helpscout_core::catalog::TEAMS, &records).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
