//! Message types — `GET /pool/{id}/read` and `PUT /pool/{id}/write`.

use serde::{Deserialize, Serialize};

/// A single message stored in a pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    /// Position of the message in its pool, assigned by the node.
    pub index: u64,

    /// Author signature, if the writer supplied one.
    pub signature: Option<String>,

    pub text: String,
}

/// Response body for `GET /pool/{id}/read`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Messages {
    /// Number of messages in this response.
    pub total: u64,
    pub messages: Vec<Message>,
}

/// Query parameters for `GET /pool/{id}/read`.
///
/// Combines pagination with key material; `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader_key: Option<String>,
}

/// Request body for `PUT /pool/{id}/write`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteMessageRequest {
    pub text: String,

    /// Author signature attached to the message. OPTIONAL.
    pub signature: Option<String>,

    /// Master key of the pool, required when the pool is write-protected.
    pub master_key: Option<String>,
}
