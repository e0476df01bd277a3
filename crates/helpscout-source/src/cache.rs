//! Run-scoped result cache.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

/// An opt-in, per-resource record cache scoped to one run.
///
/// Descriptors with `cache_results` set (currently only mailboxes) have
/// their full record list stored here on first read, so child streams that
/// slice over the same parent do not re-fetch it. Entries are read-only
/// after first population and the cache is dropped with the source at the
/// end of the run.
#[derive(Debug, Clone, Default)]
pub struct RunCache {
    inner: Arc<Mutex<HashMap<&'static str, Arc<Vec<Value>>>>>,
}

impl RunCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the cached records for a resource.
    pub async fn get(&self, name: &'static str) -> Option<Arc<Vec<Value>>> {
        self.inner.lock().await.get(name).cloned()
    }

    /// Store the records for a resource, returning the shared copy.
    ///
    /// An existing entry is kept; the first population wins.
    pub async fn put(&self, name: &'static str, records: Vec<Value>) -> Arc<Vec<Value>> {
        let mut inner = self.inner.lock().await;
        let entry = inner
            .entry(name)
            .or_insert_with(|| Arc::new(records));
        debug!(resource = name, records = entry.len(), "cached resource records");
        Arc::clone(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn first_population_wins() {
        let cache = RunCache::new();
        assert!(cache.get("mailboxes").await.is_none());

        let first = cache.put("mailboxes", vec![json!({"id": 1})]).await;
        assert_eq!(first.len(), 1);

        let second = cache.put("mailboxes", vec![json!({"id": 2}), json!({"id": 3})]).await;
        assert_eq!(second.len(), 1);
        assert_eq!(cache.get("mailboxes").await.unwrap()[0], json!({"id": 1}));
    }
}
