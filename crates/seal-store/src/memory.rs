use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::RwLock;

use seal_types::StoredRef;

use crate::error::{StoreError, StoreResult};
use crate::traits::ContentStore;

/// In-memory, HashMap-based content store.
///
/// Intended for tests and embedding. All content is held in memory
/// behind a `RwLock` and cloned on read.
pub struct InMemoryContentStore {
    blobs: RwLock<HashMap<StoredRef, Vec<u8>>>,
}

impl InMemoryContentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored documents.
    pub fn total_bytes(&self) -> u64 {
        self.blobs
            .read()
            .expect("lock poisoned")
            .values()
            .map(|blob| blob.len() as u64)
            .sum()
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for InMemoryContentStore {
    fn put(&self, stored_ref: &StoredRef, content: &[u8]) -> StoreResult<()> {
        let mut blobs = self.blobs.write().expect("lock poisoned");
        if blobs.contains_key(stored_ref) {
            return Err(StoreError::AlreadyExists(stored_ref.clone()));
        }
        blobs.insert(stored_ref.clone(), content.to_vec());
        Ok(())
    }

    fn reader(&self, stored_ref: &StoredRef) -> StoreResult<Option<Box<dyn Read + Send>>> {
        let blobs = self.blobs.read().expect("lock poisoned");
        Ok(blobs
            .get(stored_ref)
            .cloned()
            .map(|blob| Box::new(Cursor::new(blob)) as Box<dyn Read + Send>))
    }

    fn get(&self, stored_ref: &StoredRef) -> StoreResult<Option<Vec<u8>>> {
        let blobs = self.blobs.read().expect("lock poisoned");
        Ok(blobs.get(stored_ref).cloned())
    }

    fn exists(&self, stored_ref: &StoredRef) -> StoreResult<bool> {
        let blobs = self.blobs.read().expect("lock poisoned");
        Ok(blobs.contains_key(stored_ref))
    }

    fn delete(&self, stored_ref: &StoredRef) -> StoreResult<bool> {
        let mut blobs = self.blobs.write().expect("lock poisoned");
        Ok(blobs.remove(stored_ref).is_some())
    }
}

impl std::fmt::Debug for InMemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentStore")
            .field("documents", &self.len())
            .finish()
    }
}
