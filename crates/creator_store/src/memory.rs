//! In-memory scene store

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use async_trait::async_trait;
use creator_scene::{codec, SceneRecord};

use crate::store::{check_key, check_name, SceneStore, StoreError, StoreResult};

/// Scene store backed by an in-process map.
///
/// Records are kept encoded, exactly as a persistent backend would
/// hold them, so decoding rules apply on every `get`. Names list in
/// lexicographic order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<String, String>>,
    /// Maximum total encoded bytes, if limited
    quota_bytes: Option<usize>,
    writes: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total encoded size; writes beyond it fail
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Insert an already-encoded record, bypassing the codec.
    ///
    /// Used to seed records written by earlier schema versions.
    pub fn insert_raw(&self, name: impl Into<String>, encoded: impl Into<String>) {
        self.records.borrow_mut().insert(name.into(), encoded.into());
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.borrow().contains_key(name)
    }

    /// Number of successful `put` calls
    pub fn write_count(&self) -> u64 {
        self.writes.get()
    }

    fn used_bytes_without(&self, name: &str) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|(key, _)| key.as_str() != name)
            .map(|(_, value)| value.len())
            .sum()
    }
}

#[async_trait(?Send)]
impl SceneStore for MemoryStore {
    async fn put(&self, record: &SceneRecord) -> StoreResult<()> {
        check_name(record)?;
        let encoded = codec::encode(record)?;

        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(&record.name) + encoded.len();
            if needed > quota {
                return Err(StoreError::Backend(format!(
                    "quota exceeded ({} > {} bytes)",
                    needed, quota
                )));
            }
        }

        self.records.borrow_mut().insert(record.name.clone(), encoded);
        self.writes.set(self.writes.get() + 1);
        log::debug!("memory store: put {:?}", record.name);
        Ok(())
    }

    async fn get(&self, name: &str) -> StoreResult<SceneRecord> {
        let encoded = self
            .records
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        check_key(name, codec::decode(&encoded)?)
    }

    async fn delete(&self, name: &str) -> StoreResult<()> {
        if self.records.borrow_mut().remove(name).is_none() {
            log::debug!("memory store: delete of absent {:?}", name);
        }
        Ok(())
    }

    async fn list_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.records.borrow().keys().cloned().collect())
    }
}
