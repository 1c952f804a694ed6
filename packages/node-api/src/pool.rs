//! Pool types — `GET /pool/{id}`, `GET /pool/list`, `POST /pool/new`.

use serde::{Deserialize, Serialize};

/// A pool as described by the node.
///
/// Returned by `GET /pool/{id}` and `POST /pool/new`, and listed inside
/// [`Pools`].
///
/// # Example
///
/// ```json
/// {
///   "address": "9c1d0e59",
///   "tag": "lobby",
///   "description": "Say hi.",
///   "creator": null,
///   "write_key_required": false,
///   "read_key_required": false,
///   "indexable": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pool {
    /// Identifier assigned by the node. Unique per node.
    pub address: String,

    /// Human-readable tag. OPTIONAL.
    #[serde(default)]
    pub tag: Option<String>,

    /// Free-form description. OPTIONAL.
    #[serde(default)]
    pub description: Option<String>,

    /// Signature of whoever created the pool. OPTIONAL.
    #[serde(default)]
    pub creator: Option<String>,

    /// `true` when writing requires the master key.
    pub write_key_required: bool,

    /// `true` when reading requires the reader or master key.
    pub read_key_required: bool,

    /// `true` when the pool is listed by `GET /pool/list`.
    pub indexable: bool,
}

/// Response body for `GET /pool/list`.
///
/// `pools` is in the node's canonical order; `first=N` yields the earliest
/// pools, `last=N` the most recent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pools {
    /// Number of pools in this response.
    pub total: u64,
    pub pools: Vec<Pool>,
}

/// Request body for `POST /pool/new`.
///
/// Absent optional fields are sent as explicit `null`s; the node treats
/// `null` and a missing field the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPoolRequest {
    pub tag: Option<String>,

    /// Key required for writing. Also grants reading.
    pub master_key: Option<String>,

    /// Key granting read-only access. Requires `master_key`.
    pub reader_key: Option<String>,

    /// Signature of the creator.
    pub creator: Option<String>,

    pub description: Option<String>,

    /// Whether the pool should appear in the public listing.
    #[serde(default)]
    pub indexable: bool,
}

/// Key material sent as query parameters to `GET /pool/{id}`.
///
/// `None` fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader_key: Option<String>,
}

/// Pagination query parameters for `GET /pool/list`.
///
/// At most one of `first` / `last` is set by the client.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
}
