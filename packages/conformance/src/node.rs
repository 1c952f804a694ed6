//! In-memory fake evade84 node: state, access rules, and the axum router.
//!
//! Access rules follow the public contract only: a pool with a reader key
//! needs the reader or master key to be read, a pool with a master key needs
//! the master key to be written to, and only indexable pools are listed.

use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LockResult, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use eef_node_api::{
    KeyQuery, Message, Messages, NewPoolRequest, Node, PageQuery, Pool, Pools, ReadQuery,
    WriteMessageRequest,
};
use serde_json::json;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

struct StoredPool {
    pool: Pool,
    master_key: Option<String>,
    reader_key: Option<String>,
    messages: Vec<Message>,
}

impl StoredPool {
    fn can_read(&self, keys: &KeyQuery) -> bool {
        if !self.pool.read_key_required {
            return true;
        }
        let master = keys.master_key.is_some() && keys.master_key == self.master_key;
        let reader = keys.reader_key.is_some() && keys.reader_key == self.reader_key;
        master || reader
    }

    fn can_write(&self, master_key: &Option<String>) -> bool {
        !self.pool.write_key_required || (master_key.is_some() && *master_key == self.master_key)
    }
}

/// Everything the fake node stores, in creation order.
pub struct NodeState {
    name: String,
    version: String,
    pools: Vec<StoredPool>,
}

impl NodeState {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            pools: Vec::new(),
        }
    }

    /// Store a new pool and return its public description.
    pub fn create_pool(&mut self, request: NewPoolRequest) -> Pool {
        let present = |k: &Option<String>| k.as_deref().is_some_and(|k| !k.is_empty());
        let pool = Pool {
            address: format!("{:08x}", 0x9c1d_0000_u32 + self.pools.len() as u32),
            tag: request.tag,
            description: request.description,
            creator: request.creator,
            write_key_required: present(&request.master_key),
            read_key_required: present(&request.reader_key),
            indexable: request.indexable,
        };
        self.pools.push(StoredPool {
            pool: pool.clone(),
            master_key: request.master_key,
            reader_key: request.reader_key,
            messages: Vec::new(),
        });
        pool
    }

    /// Append a message to the pool with `address`; `None` if there is none.
    pub fn append_message(
        &mut self,
        address: &str,
        text: &str,
        signature: Option<String>,
    ) -> Option<Message> {
        let stored = self.pools.iter_mut().find(|p| p.pool.address == address)?;
        let message = Message {
            index: stored.messages.len() as u64,
            signature,
            text: text.to_string(),
        };
        stored.messages.push(message.clone());
        Some(message)
    }

    fn pool(&self, address: &str) -> Result<&StoredPool, AppError> {
        self.pools
            .iter()
            .find(|p| p.pool.address == address)
            .ok_or_else(|| AppError::NotFound("Pool not found.".into()))
    }
}

/// Node state plus a request counter, shared between handlers and tests.
pub struct NodeShared {
    state: Mutex<NodeState>,
    pub hits: AtomicUsize,
}

#[derive(Clone)]
pub struct SharedState(Arc<NodeShared>);

impl SharedState {
    pub fn new(state: NodeState) -> Self {
        Self(Arc::new(NodeShared {
            state: Mutex::new(state),
            hits: AtomicUsize::new(0),
        }))
    }

    pub fn lock(&self) -> LockResult<MutexGuard<'_, NodeState>> {
        self.0.state.lock()
    }
}

impl Deref for SharedState {
    type Target = NodeShared;

    fn deref(&self) -> &NodeShared {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the fake node's router with shared state.
pub fn build_router(state: SharedState) -> Router {
    let counter = state.clone();
    Router::new()
        .route("/node", get(node_info))
        .route("/pool/list", get(pool_list))
        .route("/pool/new", post(pool_new))
        .route("/pool/{id}", get(pool_info))
        .route("/pool/{id}/read", get(pool_read))
        .route("/pool/{id}/write", put(pool_write))
        .with_state(state)
        .layer(axum::middleware::from_fn(move |req, next| {
            count_request(counter.clone(), req, next)
        }))
}

async fn count_request(state: SharedState, req: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

/// Slice `items` per `first` / `last`, the way the node paginates.
fn paginate<T: Clone>(items: &[T], page: PageQuery) -> Result<Vec<T>, AppError> {
    match (page.first, page.last) {
        (Some(_), Some(_)) => Err(AppError::BadRequest(
            "Parameters first and last are mutually exclusive.".into(),
        )),
        (Some(n), None) => Ok(items.iter().take(n as usize).cloned().collect()),
        (None, Some(n)) => {
            let skip = items.len().saturating_sub(n as usize);
            Ok(items[skip..].to_vec())
        }
        (None, None) => Ok(items.to_vec()),
    }
}

fn locked(state: &SharedState) -> MutexGuard<'_, NodeState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /node`
async fn node_info(State(state): State<SharedState>) -> Json<Node> {
    let node = locked(&state);
    Json(Node {
        name: node.name.clone(),
        version: node.version.clone(),
    })
}

/// `GET /pool/list`
async fn pool_list(
    State(state): State<SharedState>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Pools>, AppError> {
    let node = locked(&state);
    let indexable: Vec<Pool> = node
        .pools
        .iter()
        .filter(|p| p.pool.indexable)
        .map(|p| p.pool.clone())
        .collect();
    let pools = paginate(&indexable, page)?;
    Ok(Json(Pools {
        total: pools.len() as u64,
        pools,
    }))
}

/// `POST /pool/new`
async fn pool_new(
    State(state): State<SharedState>,
    Json(request): Json<NewPoolRequest>,
) -> Result<Json<Pool>, AppError> {
    let mut node = locked(&state);
    if request.reader_key.is_some() && request.master_key.is_none() {
        return Err(AppError::BadRequest(
            "Pool with reader key must have master key.".into(),
        ));
    }
    if let Some(tag) = request.tag.as_deref() {
        if node.pools.iter().any(|p| p.pool.tag.as_deref() == Some(tag)) {
            return Err(AppError::Conflict("Pool with this tag already exists.".into()));
        }
    }
    Ok(Json(node.create_pool(request)))
}

/// `GET /pool/{id}`
async fn pool_info(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(keys): Query<KeyQuery>,
) -> Result<Json<Pool>, AppError> {
    let node = locked(&state);
    let stored = node.pool(&id)?;
    if !stored.can_read(&keys) {
        return Err(AppError::Forbidden("Access Denied: Invalid Key.".into()));
    }
    Ok(Json(stored.pool.clone()))
}

/// `GET /pool/{id}/read`
async fn pool_read(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<ReadQuery>,
) -> Result<Json<Messages>, AppError> {
    let node = locked(&state);
    let stored = node.pool(&id)?;
    let keys = KeyQuery {
        master_key: query.master_key,
        reader_key: query.reader_key,
    };
    if !stored.can_read(&keys) {
        return Err(AppError::Forbidden("Access Denied: Invalid Key.".into()));
    }
    let page = PageQuery {
        first: query.first,
        last: query.last,
    };
    let messages = paginate(&stored.messages, page)?;
    Ok(Json(Messages {
        total: messages.len() as u64,
        messages,
    }))
}

/// `PUT /pool/{id}/write`
async fn pool_write(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<WriteMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let mut node = locked(&state);
    if !node.pool(&id)?.can_write(&request.master_key) {
        return Err(AppError::Forbidden("Access Denied: Invalid Master Key.".into()));
    }
    if request.text.is_empty() {
        return Err(AppError::Unprocessable(json!({
            "detail": [{
                "loc": ["body", "text"],
                "msg": "ensure this value has at least 1 characters",
                "type": "value_error.any_str.min_length"
            }]
        })));
    }
    let message = node
        .append_message(&id, &request.text, request.signature)
        .ok_or_else(|| AppError::NotFound("Pool not found.".into()))?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_first_and_last() {
        let items = [1, 2, 3, 4, 5];
        let first = PageQuery {
            first: Some(2),
            last: None,
        };
        let last = PageQuery {
            first: None,
            last: Some(2),
        };
        assert_eq!(paginate(&items, first).unwrap(), vec![1, 2]);
        assert_eq!(paginate(&items, last).unwrap(), vec![4, 5]);
        assert_eq!(
            paginate(&items, PageQuery { first: None, last: Some(50) }).unwrap(),
            items.to_vec()
        );
    }

    #[test]
    fn reader_key_grants_read_only() {
        let mut node = NodeState::new("n", "0.1.0");
        let pool = node.create_pool(NewPoolRequest {
            master_key: Some("mk".into()),
            reader_key: Some("rk".into()),
            ..Default::default()
        });
        let stored = node.pool(&pool.address).unwrap();
        let reader = KeyQuery {
            master_key: None,
            reader_key: Some("rk".into()),
        };
        assert!(stored.can_read(&reader));
        assert!(!stored.can_read(&KeyQuery::default()));
        assert!(!stored.can_write(&Some("rk".into())));
        assert!(stored.can_write(&Some("mk".into())));
    }
}
