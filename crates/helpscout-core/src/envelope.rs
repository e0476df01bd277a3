//! Response envelope and pagination cursor.
//!
//! Every collection endpoint of the Mailbox API wraps its records in a HAL
//! style envelope: the records sit under `_embedded.<model>` and a `page`
//! object carries the pagination metadata.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::Result;

/// Pagination state for the next page request.
///
/// An absent cursor signals the terminal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// The 1-based number of the next page to request.
    pub next_page_number: u32,
}

/// The `page` metadata object of a collection response.
///
/// Every member is optional at the wire level so that a partial `page`
/// object still decodes; [`PageEnvelope::next_cursor`] turns missing
/// pagination members into a domain error rather than a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    /// Page size.
    #[serde(default)]
    pub size: u64,

    /// Total number of records in the collection.
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,

    /// Total number of pages.
    #[serde(rename = "totalPages", default)]
    pub total_pages: Option<u32>,

    /// Current page number (1-based).
    #[serde(default)]
    pub number: Option<u32>,
}

/// A decoded collection response envelope.
///
/// Both the `_embedded` and `page` members are optional in the wire format;
/// which of the two a given operation requires is decided by the accessors
/// below, not by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageEnvelope {
    #[serde(rename = "_embedded", default)]
    embedded: Option<serde_json::Map<String, Value>>,

    #[serde(default)]
    page: Option<PageMeta>,
}

impl PageEnvelope {
    /// Compute the cursor for the page after this one.
    ///
    /// Returns `None` when this is the last page (`number == totalPages`)
    /// or the collection is empty (`totalPages == 0`).
    ///
    /// # Errors
    ///
    /// A response without a `page` object cannot be paginated and fails
    /// with [`Error::MalformedResponse`]; so does a `page` object missing
    /// `number` or `totalPages`.
    pub fn next_cursor(&self) -> Result<Option<PageCursor>> {
        let page = self.page.as_ref().ok_or_else(|| {
            Error::MalformedResponse("response is missing the `page` pagination object".to_string())
        })?;

        let (number, total_pages) = match (page.number, page.total_pages) {
            (Some(number), Some(total_pages)) => (number, total_pages),
            _ => {
                return Err(Error::MalformedResponse(
                    "`page` object is missing `number` or `totalPages`".to_string(),
                ));
            }
        };

        if number == total_pages || total_pages == 0 {
            Ok(None)
        } else {
            Ok(Some(PageCursor {
                next_page_number: number + 1,
            }))
        }
    }

    /// Extract the record list for the given model name.
    ///
    /// A missing `_embedded` member is the normal "no records" case and
    /// yields an empty list. Records are passed through unchanged.
    ///
    /// # Errors
    ///
    /// An `_embedded` member that lacks the model key, or whose value is
    /// not an array, fails with [`Error::MalformedResponse`].
    pub fn records(&self, model: &str) -> Result<Vec<Value>> {
        let Some(embedded) = &self.embedded else {
            return Ok(Vec::new());
        };

        let value = embedded.get(model).ok_or_else(|| {
            Error::MalformedResponse(format!("`_embedded` is missing the `{}` collection", model))
        })?;

        value.as_array().cloned().ok_or_else(|| {
            Error::MalformedResponse(format!("`_embedded.{}` is not an array", model))
        })
    }

    /// Returns the `page` metadata, if present.
    pub fn page(&self) -> Option<&PageMeta> {
        self.page.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(body: Value) -> PageEnvelope {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn last_page_has_no_next_cursor() {
        let env = envelope(json!({
            "page": {"size": 25, "totalElements": 5, "totalPages": 3, "number": 3}
        }));
        assert_eq!(env.next_cursor().unwrap(), None);
    }

    #[test]
    fn empty_collection_has_no_next_cursor() {
        let env = envelope(json!({
            "page": {"size": 25, "totalElements": 0, "totalPages": 0, "number": 1}
        }));
        assert_eq!(env.next_cursor().unwrap(), None);
    }

    #[test]
    fn intermediate_page_advances_by_one() {
        let env = envelope(json!({
            "page": {"size": 25, "totalElements": 60, "totalPages": 3, "number": 1}
        }));
        assert_eq!(
            env.next_cursor().unwrap(),
            Some(PageCursor {
                next_page_number: 2
            })
        );
    }

    #[test]
    fn missing_page_object_is_malformed() {
        let env = envelope(json!({"_embedded": {"users": []}}));
        let err = env.next_cursor().unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.to_string().contains("page"));
    }

    #[test]
    fn partial_page_metadata_is_malformed() {
        let env = envelope(json!({
            "_embedded": {"users": []},
            "page": {"size": 25, "number": 1}
        }));
        let err = env.next_cursor().unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.to_string().contains("totalPages"));

        let env = envelope(json!({
            "page": {"size": 25, "totalPages": 3}
        }));
        assert!(matches!(
            env.next_cursor(),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_embedded_yields_empty_records() {
        let env = envelope(json!({
            "page": {"size": 25, "totalElements": 0, "totalPages": 0, "number": 1}
        }));
        assert!(env.records("users").unwrap().is_empty());
    }

    #[test]
    fn records_are_passed_through_unchanged() {
        let env = envelope(json!({
            "_embedded": {
                "conversations": [
                    {"id": 1678805282, "number": 5, "threads": 1, "type": "email"}
                ]
            },
            "page": {"size": 25, "totalElements": 5, "totalPages": 1, "number": 1}
        }));

        let records = env.records("conversations").unwrap();
        assert_eq!(
            records,
            vec![json!({"id": 1678805282, "number": 5, "threads": 1, "type": "email"})]
        );
        assert_eq!(env.next_cursor().unwrap(), None);
    }

    #[test]
    fn embedded_without_model_key_is_malformed() {
        let env = envelope(json!({
            "_embedded": {"users": []},
            "page": {"size": 25, "totalElements": 0, "totalPages": 0, "number": 1}
        }));
        assert!(matches!(
            env.records("teams"),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn embedded_non_array_model_is_malformed() {
        let env = envelope(json!({
            "_embedded": {"users": {"id": 1}},
        }));
        assert!(matches!(
            env.records("users"),
            Err(Error::MalformedResponse(_))
        ));
    }
}
