//! Outcome taxonomy of a call to the node.
//!
//! Every failed call is classified exactly once, by the gateway in
//! [`crate::client`], into one [`ClientError`] variant. Callers never inspect
//! HTTP status codes themselves.

use serde_json::Value;
use thiserror::Error;

/// A terminal failure while talking to the node.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed (e.g. TLS backend failure).
    #[error("failed to initialise the HTTP client: {0}")]
    Setup(#[source] reqwest::Error),

    /// The node could not be reached, or the connection broke mid-response.
    #[error("could not connect to the node ({url}).")]
    ConnectionFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// `400` — the node rejected the request data.
    #[error("API request input data is incorrect: {0}")]
    InvalidInput(String),

    /// `403` — the supplied key material does not grant access.
    #[error("{0}")]
    AccessDenied(String),

    /// `404` — the pool (or route) does not exist.
    #[error("{0}")]
    NotFound(String),

    /// `409` — the request conflicts with the pool's current state.
    #[error("{0}")]
    Conflict(String),

    /// `422` — request validation failed; carries the node's full payload
    /// because it may list several field-level causes.
    #[error("API request validation error: {0}.")]
    ValidationError(Value),

    /// Any status the protocol does not define.
    #[error("invalid response code from the node: {0}.")]
    UnexpectedStatus(u16),

    /// A `200` body that does not match the operation's response shape.
    #[error("malformed response from the node ({operation}): {source}")]
    MalformedResponse {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Request parameters or body could not be encoded; nothing was sent.
    #[error("could not encode the request: {0}")]
    Encoding(String),
}

/// Discriminant of [`ClientError`], for callers that only need the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local: the HTTP client or the request itself could not be built.
    Setup,
    ConnectionFailure,
    InvalidInput,
    AccessDenied,
    NotFound,
    Conflict,
    ValidationError,
    UnexpectedStatus,
    MalformedResponse,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Setup(_) | ClientError::Encoding(_) => ErrorKind::Setup,
            ClientError::ConnectionFailure { .. } => ErrorKind::ConnectionFailure,
            ClientError::InvalidInput(_) => ErrorKind::InvalidInput,
            ClientError::AccessDenied(_) => ErrorKind::AccessDenied,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::Conflict(_) => ErrorKind::Conflict,
            ClientError::ValidationError(_) => ErrorKind::ValidationError,
            ClientError::UnexpectedStatus(_) => ErrorKind::UnexpectedStatus,
            ClientError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }
}
