//! Shared helpers for the eef end-to-end test suite.
//!
//! Provides [`spawn_node`] — a function that binds a listener on an ephemeral
//! port, serves an in-memory fake evade84 node on it from a background
//! thread, and returns a [`FakeNode`] handle carrying the node URL and direct
//! access to the node's state, so tests can seed pools without going through
//! the HTTP layer.
//!
//! [`spawn_stub`] serves a fixed status/body pair for every request, for
//! exercising the client's status classification against a real socket, and
//! [`unreachable_url`] yields a URL nobody listens on.
//!
//! The client under test is blocking, so each server runs on its own
//! single-threaded tokio runtime rather than inside the test's thread.

mod error;
mod node;

use std::net::TcpListener;
use std::sync::atomic::Ordering;

use axum::{
    http::{header, StatusCode},
    Router,
};
use eef_node_api::{Message, NewPoolRequest, Pool};

pub use error::AppError;
pub use node::{NodeState, SharedState};

/// Name reported by fake nodes.
pub const NODE_NAME: &str = "conformance-node";

/// Version reported by [`spawn_node`].
pub const NODE_VERSION: &str = "0.1.0";

/// Handle to a running fake node.
#[derive(Clone)]
pub struct FakeNode {
    /// Base URL, e.g. `http://127.0.0.1:51234`.
    pub url: String,
    state: SharedState,
}

impl FakeNode {
    /// Create a pool directly in node state, bypassing HTTP.
    pub fn seed_pool(&self, request: NewPoolRequest) -> Pool {
        self.state.lock().expect("node state").create_pool(request)
    }

    /// Append a message directly in node state, bypassing HTTP.
    ///
    /// # Panics
    ///
    /// Panics if no pool has the given address.
    pub fn seed_message(&self, address: &str, text: &str, signature: Option<&str>) -> Message {
        self.state
            .lock()
            .expect("node state")
            .append_message(address, text, signature.map(str::to_string))
            .expect("seeded pool must exist")
    }

    /// Number of HTTP requests this node has received.
    pub fn requests(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

/// Start a fake node reporting [`NODE_VERSION`].
pub fn spawn_node() -> FakeNode {
    spawn_node_with_version(NODE_VERSION)
}

/// Start a fake node reporting an arbitrary version.
///
/// # Panics
///
/// Panics if the listener cannot be bound or the runtime cannot start.
pub fn spawn_node_with_version(version: &str) -> FakeNode {
    let state = SharedState::new(NodeState::new(NODE_NAME, version));
    let url = serve(node::build_router(state.clone()));
    FakeNode { url, state }
}

/// Start a server answering every request with `status` and a JSON `body`.
pub fn spawn_stub(status: u16, body: &str) -> String {
    let status = StatusCode::from_u16(status).expect("valid status code");
    let body = body.to_string();
    let router = Router::new().fallback(move || {
        let body = body.clone();
        async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }
    });
    serve(router)
}

/// A URL on which nothing is listening.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Serve `router` from a background thread and return its base URL.
///
/// The listener is bound before this returns, so connections made right away
/// queue in the backlog instead of being refused.
fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    listener.set_nonblocking(true).expect("set listener non-blocking");

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("build fake node runtime");
        runtime.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt std listener");
            axum::serve(listener, router)
                .await
                .expect("fake node error");
        });
    });

    format!("http://{addr}")
}
