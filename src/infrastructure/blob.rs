//! Key-value blob persistence

use crate::error::{BulletinError, Result};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Whole-document persistence used by the stores.
///
/// `put` is an idempotent overwrite; a document is either fully written or
/// not written at all.
pub trait BlobStore {
    /// Read a document; `None` when it has never been written
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace a document
    fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Keys starting with `prefix`, sorted
    fn list(&self, prefix: &str) -> Result<Vec<String>>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).put(key, bytes)
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).list(prefix)
    }
}

/// In-memory blob store. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    documents: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail until switched off again
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn documents(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.documents
            .lock()
            .map_err(|_| BulletinError::PersistenceFailure("memory store lock poisoned".to_string()))
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.documents()?.get(key).cloned())
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BulletinError::PersistenceFailure(format!(
                "write to '{}' rejected",
                key
            )));
        }
        self.documents()?.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .documents()?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
