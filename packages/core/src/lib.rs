//! Client library for evade84 nodes.
//!
//! This crate is the engine behind the `eef` command-line tool. It resolves
//! pagination intent, talks to a node over HTTP, classifies every response
//! into a single outcome, and renders the results as terminal text.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pagination`] | Head/tail resolution via [`Pagination::resolve`] |
//! | [`client`] | The API gateway, [`NodeClient`], and [`classify`] |
//! | [`error`] | The outcome taxonomy, [`ClientError`] / [`ErrorKind`] |
//! | [`config`] | Locating and validating the node URL, [`ClientConfig`] |
//! | [`validation`] | Local checks on pool creation via [`validate_new_pool`] |
//! | [`compat`] | Node versions this client supports |
//! | [`render`] | Human-readable output |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use eef::{ClientConfig, NodeClient, Pagination};
//!
//! let config = ClientConfig::new("http://127.0.0.1:8000")?;
//! let client = NodeClient::new(&config)?;
//!
//! let page = Pagination::resolve(None, Some(10))?;
//! let pools = client.pool_list(page)?;
//! print!("{}", eef::render::render_pools(&pools, page));
//! ```

pub mod client;
pub mod compat;
pub mod config;
pub mod error;
pub mod pagination;
pub mod render;
pub mod validation;

pub use client::{classify, decode, ApiRequest, NodeClient};
pub use compat::{is_compatible, COMPATIBLE_NODE_VERSIONS};
pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, ErrorKind};
pub use pagination::{Pagination, PaginationError, DEFAULT_TAIL};
pub use validation::{validate_new_pool, ValidNewPool, ValidationError};
