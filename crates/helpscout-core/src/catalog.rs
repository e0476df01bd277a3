//! Stream descriptor catalog.
//!
//! The upstream API exposes one collection per resource; every stream is a
//! declarative [`StreamDescriptor`] over the same paginated request cycle,
//! so the full connector surface is this static table rather than a type
//! per resource.

use serde_json::Value;

use crate::envelope::PageCursor;

/// How a stream's endpoint paginates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// The page number is appended to the resource path (`users/2`).
    ///
    /// The Mailbox API encodes page numbers in the path rather than a query
    /// parameter; this quirk is preserved as observed.
    PageSuffix,

    /// The endpoint is read as a single page and never paginated.
    SinglePage,
}

/// A unit of iteration context for a child stream: one parent record id.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    id: Value,
}

impl Slice {
    /// Create a slice from a parent record's primary key value.
    pub fn new(id: Value) -> Self {
        Self { id }
    }

    /// Returns the parent record id.
    pub fn id(&self) -> &Value {
        &self.id
    }

    /// Renders the id as a URL path segment.
    pub fn path_segment(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Declarative description of one record stream.
///
/// A descriptor carries everything the paginated request cycle needs:
/// the resource path template, the `_embedded` collection key, the
/// primary-key field name, and (for child streams) the parent descriptor
/// whose records supply the `{id}` slices.
#[derive(Debug)]
pub struct StreamDescriptor {
    /// Stream name, as surfaced to the hosting framework.
    pub name: &'static str,

    /// Resource path template; child paths contain an `{id}` placeholder.
    pub path: &'static str,

    /// Key of the record list under `_embedded`.
    pub model: &'static str,

    /// Field used by the hosting framework for deduplication and state.
    pub primary_key: &'static str,

    /// Parent descriptor for child streams; slicing is one level deep.
    pub parent: Option<&'static StreamDescriptor>,

    /// Pagination behavior of the endpoint.
    pub pagination: Pagination,

    /// Whether records read from this stream are cached for reuse by child
    /// streams within the same run.
    pub cache_results: bool,
}

impl StreamDescriptor {
    /// Whether this descriptor describes a child stream.
    pub fn is_child(&self) -> bool {
        self.parent.is_some()
    }

    /// Build the request path for one page of this stream.
    ///
    /// The first page requests the bare resource path; subsequent pages
    /// append the page number as a path suffix. For child streams the
    /// slice id is interpolated into the `{id}` placeholder.
    pub fn request_path(&self, slice: Option<&Slice>, cursor: Option<&PageCursor>) -> String {
        let base = match slice {
            Some(slice) => self.path.replace("{id}", &slice.path_segment()),
            None => self.path.to_string(),
        };

        match cursor {
            Some(cursor) => format!("{}/{}", base, cursor.next_page_number),
            None => base,
        }
    }
}

const fn leaf(
    name: &'static str,
    path: &'static str,
    model: &'static str,
) -> StreamDescriptor {
    StreamDescriptor {
        name,
        path,
        model,
        primary_key: "id",
        parent: None,
        pagination: Pagination::PageSuffix,
        cache_results: false,
    }
}

const fn child(
    name: &'static str,
    path: &'static str,
    model: &'static str,
    parent: &'static StreamDescriptor,
) -> StreamDescriptor {
    StreamDescriptor {
        name,
        path,
        model,
        primary_key: "id",
        parent: Some(parent),
        pagination: Pagination::PageSuffix,
        cache_results: false,
    }
}

pub static USERS: StreamDescriptor = leaf("users", "users", "users");
pub static TEAMS: StreamDescriptor = leaf("teams", "teams", "teams");
pub static CONVERSATIONS: StreamDescriptor =
    leaf("conversations", "conversations", "conversations");
pub static CUSTOMERS: StreamDescriptor = leaf("customers", "customers", "customers");
pub static TAGS: StreamDescriptor = leaf("tags", "tags", "tags");
pub static WORKFLOWS: StreamDescriptor = leaf("workflows", "workflows", "workflows");
pub static WEBHOOKS: StreamDescriptor = leaf("webhooks", "webhooks", "webhooks");

/// Mailbox records are sliced over by two child streams; caching avoids
/// re-fetching the collection per child.
pub static MAILBOXES: StreamDescriptor = StreamDescriptor {
    cache_results: true,
    ..leaf("mailboxes", "mailboxes", "mailboxes")
};

/// Keyed by `slug` rather than `id`, and served as a single page.
pub static CUSTOMER_PROPERTIES: StreamDescriptor = StreamDescriptor {
    primary_key: "slug",
    pagination: Pagination::SinglePage,
    ..leaf("customer_properties", "customer-properties", "customer-properties")
};

pub static TEAM_MEMBERS: StreamDescriptor =
    child("team_members", "teams/{id}/members", "users", &TEAMS);
pub static THREADS: StreamDescriptor = child(
    "threads",
    "conversations/{id}/threads",
    "threads",
    &CONVERSATIONS,
);
pub static MAILBOX_FOLDERS: StreamDescriptor = child(
    "mailbox_folders",
    "mailboxes/{id}/folders",
    "folders",
    &MAILBOXES,
);
pub static MAILBOX_CUSTOM_FIELDS: StreamDescriptor = child(
    "mailbox_custom_fields",
    "mailboxes/{id}/fields",
    "fields",
    &MAILBOXES,
);

/// Treated as single-page upstream; the endpoint may in fact paginate, but
/// the observed behavior is preserved pending verification.
pub static CUSTOMER_EMAILS: StreamDescriptor = StreamDescriptor {
    pagination: Pagination::SinglePage,
    ..child("customer_emails", "customers/{id}/emails", "emails", &CUSTOMERS)
};

/// The full stream catalog, in the order streams are surfaced.
pub fn catalog() -> [&'static StreamDescriptor; 14] {
    [
        &USERS,
        &TEAMS,
        &CONVERSATIONS,
        &CUSTOMERS,
        &TAGS,
        &WORKFLOWS,
        &MAILBOXES,
        &MAILBOX_FOLDERS,
        &MAILBOX_CUSTOM_FIELDS,
        &THREADS,
        &CUSTOMER_EMAILS,
        &TEAM_MEMBERS,
        &WEBHOOKS,
        &CUSTOMER_PROPERTIES,
    ]
}
