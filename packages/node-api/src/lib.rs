//! Request and response types for the evade84 node API.
//!
//! This crate encodes the HTTP contract between the `eef` client and an
//! evade84 node as Rust types. It holds no I/O; the client crate sends these
//! types over the wire and the conformance suite's fake node receives them.
//!
//! # Endpoints covered
//!
//! | Method | Path | Type |
//! |--------|------|------|
//! | GET | `/node` | → [`Node`] |
//! | GET | `/pool/{id}` | [`KeyQuery`] → [`Pool`] |
//! | GET | `/pool/list` | [`PageQuery`] → [`Pools`] |
//! | POST | `/pool/new` | [`NewPoolRequest`] → [`Pool`] |
//! | GET | `/pool/{id}/read` | [`ReadQuery`] → [`Messages`] |
//! | PUT | `/pool/{id}/write` | [`WriteMessageRequest`] → [`Message`] |
//!
//! Every non-200 response carries an [`ErrorResponse`] body, except `422`
//! whose body is an arbitrary validation payload.

pub mod error;
pub mod message;
pub mod node;
pub mod pool;

pub use error::ErrorResponse;
pub use message::{Message, Messages, ReadQuery, WriteMessageRequest};
pub use node::Node;
pub use pool::{KeyQuery, NewPoolRequest, PageQuery, Pool, Pools};
