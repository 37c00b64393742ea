//! Scene store contract

use std::rc::Rc;

use async_trait::async_trait;
use creator_scene::{validate_name, CodecError, ParseError, SceneRecord};
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Scene not found: {0}")]
    NotFound(String),

    /// Underlying persistence failure (quota exceeded, backend closed, ...)
    #[error("Store backend error: {0}")]
    Backend(String),

    /// The record's name cannot be used as a key
    #[error("Invalid scene name: {0}")]
    InvalidName(#[from] ParseError),

    #[error("Record codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Reject a record whose name is not a usable key
pub(crate) fn check_name(record: &SceneRecord) -> StoreResult<()> {
    validate_name(&record.name)?;
    Ok(())
}

/// A decoded record must carry the name it was stored under
pub(crate) fn check_key(key: &str, record: SceneRecord) -> StoreResult<SceneRecord> {
    if record.name != key {
        return Err(CodecError::Malformed(format!(
            "record named {:?} stored under {:?}",
            record.name, key
        ))
        .into());
    }
    Ok(record)
}

/// Keyed asynchronous persistence of scene records.
///
/// Every call may suspend. Implementations are used from a single
/// thread and provide no locking of their own; callers serialize
/// mutations.
#[async_trait(?Send)]
pub trait SceneStore {
    /// Write `record` under `record.name`, replacing any existing record.
    ///
    /// Names rejected by `validate_name` fail with `StoreError::InvalidName`.
    async fn put(&self, record: &SceneRecord) -> StoreResult<()>;

    /// Read a record, or `StoreError::NotFound`.
    ///
    /// A stored record whose name differs from `name` is a codec error.
    async fn get(&self, name: &str) -> StoreResult<SceneRecord>;

    /// Remove a record. Removing an absent name succeeds.
    async fn delete(&self, name: &str) -> StoreResult<()>;

    /// All stored names, in store-defined order
    async fn list_names(&self) -> StoreResult<Vec<String>>;
}

#[async_trait(?Send)]
impl<S: SceneStore + ?Sized> SceneStore for Rc<S> {
    async fn put(&self, record: &SceneRecord) -> StoreResult<()> {
        (**self).put(record).await
    }

    async fn get(&self, name: &str) -> StoreResult<SceneRecord> {
        (**self).get(name).await
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        (**self).delete(name).await
    }

    async fn list_names(&self) -> StoreResult<Vec<String>> {
        (**self).list_names().await
    }
}
