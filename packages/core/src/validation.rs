use eef_node_api::NewPoolRequest;
use thiserror::Error;

/// Reasons a pool creation request is rejected before it is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("pool with reader key cannot be indexable.")]
    IndexableWithReaderKey,

    #[error("pool with reader key must have master key.")]
    ReaderKeyWithoutMasterKey,
}

/// Check the key/flag combination of a new pool.
///
/// A reader key restricts reading, which contradicts public indexing, and a
/// reader key is meaningless without a master key to write with. Empty keys
/// count as absent.
pub fn validate_new_pool(pool: &NewPoolRequest) -> Result<(), ValidationError> {
    let has_reader_key = is_present(&pool.reader_key);

    if pool.indexable && has_reader_key {
        return Err(ValidationError::IndexableWithReaderKey);
    }

    if has_reader_key && !is_present(&pool.master_key) {
        return Err(ValidationError::ReaderKeyWithoutMasterKey);
    }

    Ok(())
}

/// A pool creation request whose key/flag combination has been checked.
///
/// [`crate::NodeClient::pool_new`] only accepts this type, so validation
/// happens exactly once, wherever the request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidNewPool(NewPoolRequest);

impl ValidNewPool {
    pub fn new(request: NewPoolRequest) -> Result<Self, ValidationError> {
        validate_new_pool(&request)?;
        Ok(Self(request))
    }

    pub fn request(&self) -> &NewPoolRequest {
        &self.0
    }
}

fn is_present(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|k| !k.is_empty())
}
