//! The API gateway: one HTTP request per call, one classified outcome.
//!
//! [`NodeClient::call`] sends an [`ApiRequest`] to the configured node and
//! hands the status/body pair to [`classify`], which decides between the
//! decoded JSON payload and exactly one [`ClientError`]. The typed operations
//! (`node`, `pool_info`, ...) then map the payload into `eef-node-api` types;
//! a body that does not fit becomes [`ClientError::MalformedResponse`].
//!
//! There are no retries. Any transport failure is reported as
//! [`ClientError::ConnectionFailure`] naming the node URL.

use eef_node_api::{
    ErrorResponse, KeyQuery, Message, Messages, Node, Pool, Pools, ReadQuery,
    WriteMessageRequest,
};
use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::pagination::Pagination;
use crate::validation::ValidNewPool;

// ---------------------------------------------------------------------------
// ApiRequest
// ---------------------------------------------------------------------------

/// A logical node operation: method, path, query parameters, optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Add every field of a serialisable struct as a query parameter,
    /// skipping fields that serialise to `null`.
    ///
    /// The value must serialise to a JSON object.
    pub fn params<Q: Serialize>(mut self, query: &Q) -> Result<Self, ClientError> {
        let fields = match serde_json::to_value(query) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(ClientError::Encoding(format!(
                    "query parameters must be an object, got {other}"
                )))
            }
            Err(e) => return Err(ClientError::Encoding(e.to_string())),
        };
        for (name, value) in fields {
            match value {
                Value::Null => {}
                Value::String(s) => self.query.push((name, s)),
                other => self.query.push((name, other.to_string())),
            }
        }
        Ok(self)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Encoding(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// `/pool/{id}` with the identifier percent-encoded as a single segment.
fn pool_path(identifier: &str, suffix: &str) -> String {
    format!("/pool/{}{}", urlencoding::encode(identifier), suffix)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a raw node response.
///
/// `200` yields the decoded JSON body. Every other status yields exactly one
/// terminal [`ClientError`]. Node-supplied messages are lower-cased for all
/// four message-carrying statuses.
pub fn classify(status: u16, body: &[u8]) -> Result<Value, ClientError> {
    match status {
        200 => serde_json::from_slice(body).map_err(|source| ClientError::MalformedResponse {
            operation: "response body",
            source,
        }),
        400 => Err(ClientError::InvalidInput(error_message(status, body))),
        403 => Err(ClientError::AccessDenied(error_message(status, body))),
        404 => Err(ClientError::NotFound(error_message(status, body))),
        409 => Err(ClientError::Conflict(error_message(status, body))),
        422 => Err(ClientError::ValidationError(
            serde_json::from_slice(body)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned())),
        )),
        other => Err(ClientError::UnexpectedStatus(other)),
    }
}

/// Pull `error_message` out of an error body, falling back to the raw text.
fn error_message(status: u16, body: &[u8]) -> String {
    let message = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(e) => e.error_message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    };
    if message.is_empty() {
        format!("node returned status {status} without an error message")
    } else {
        message.to_lowercase()
    }
}

/// Map a success payload onto the operation's response type.
pub fn decode<T: DeserializeOwned>(operation: &'static str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value)
        .map_err(|source| ClientError::MalformedResponse { operation, source })
}

// ---------------------------------------------------------------------------
// NodeClient
// ---------------------------------------------------------------------------

/// Blocking client bound to a single node URL.
#[derive(Debug, Clone)]
pub struct NodeClient {
    node_url: String,
    http: Client,
}

impl NodeClient {
    /// Build a client from an already-validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Setup)?;
        Ok(Self {
            node_url: config.node_url.clone(),
            http,
        })
    }

    /// Base URL of the node, without a trailing slash.
    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Execute one request and classify the result.
    pub fn call(&self, request: &ApiRequest) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.node_url, request.path);
        debug!(method = %request.method, %url, "sending request to node");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|source| self.connection_failure(source))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|source| self.connection_failure(source))?;
        debug!(status, bytes = body.len(), "node responded");
        trace!(body = %String::from_utf8_lossy(&body), "response body");

        classify(status, &body)
    }

    fn connection_failure(&self, source: reqwest::Error) -> ClientError {
        ClientError::ConnectionFailure {
            url: self.node_url.clone(),
            source,
        }
    }

    /// `GET /node`
    pub fn node(&self) -> Result<Node, ClientError> {
        let value = self.call(&ApiRequest::get("/node"))?;
        decode("node", value)
    }

    /// `GET /pool/{id}`
    pub fn pool_info(&self, identifier: &str, keys: &KeyQuery) -> Result<Pool, ClientError> {
        let request = ApiRequest::get(pool_path(identifier, "")).params(keys)?;
        decode("pool info", self.call(&request)?)
    }

    /// `GET /pool/list`
    pub fn pool_list(&self, pagination: Pagination) -> Result<Pools, ClientError> {
        let request = ApiRequest::get("/pool/list").params(&pagination.page_query())?;
        decode("pool list", self.call(&request)?)
    }

    /// `POST /pool/new`
    ///
    /// Takes a [`ValidNewPool`], so an invalid combination of keys and flags
    /// never reaches the node.
    pub fn pool_new(&self, pool: &ValidNewPool) -> Result<Pool, ClientError> {
        let request = ApiRequest::post("/pool/new").json(pool.request())?;
        decode("pool creation", self.call(&request)?)
    }

    /// `GET /pool/{id}/read`
    pub fn pool_read(
        &self,
        identifier: &str,
        pagination: Pagination,
        keys: &KeyQuery,
    ) -> Result<Messages, ClientError> {
        let (first, last) = pagination.as_pair();
        let query = ReadQuery {
            first,
            last,
            master_key: keys.master_key.clone(),
            reader_key: keys.reader_key.clone(),
        };
        let request = ApiRequest::get(pool_path(identifier, "/read")).params(&query)?;
        decode("pool read", self.call(&request)?)
    }

    /// `PUT /pool/{id}/write`
    pub fn pool_write(
        &self,
        identifier: &str,
        message: &WriteMessageRequest,
    ) -> Result<Message, ClientError> {
        let request = ApiRequest::put(pool_path(identifier, "/write")).json(message)?;
        decode("pool write", self.call(&request)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
