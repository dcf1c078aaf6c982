use std::io::Read;

use seal_types::StoredRef;

use crate::error::StoreResult;

/// Opaque byte storage for document content, keyed by stored reference.
///
/// All implementations must satisfy these invariants:
/// - Content is write-once: a reference can never be overwritten, only
///   deleted and re-created. `put` on a taken reference fails with
///   `AlreadyExists`.
/// - The store never interprets content. Hashing and signing happen
///   above it.
/// - Concurrent reads are always safe.
/// - I/O errors are propagated, never silently swallowed.
pub trait ContentStore: Send + Sync {
    /// Store content under a reference.
    fn put(&self, stored_ref: &StoredRef, content: &[u8]) -> StoreResult<()>;

    /// Open a streaming reader over the content.
    ///
    /// Returns `Ok(None)` if nothing is stored under the reference.
    /// Callers hash large documents through this without buffering
    /// them whole.
    fn reader(&self, stored_ref: &StoredRef) -> StoreResult<Option<Box<dyn Read + Send>>>;

    /// Read the complete content into memory.
    ///
    /// Returns `Ok(None)` if nothing is stored under the reference.
    fn get(&self, stored_ref: &StoredRef) -> StoreResult<Option<Vec<u8>>> {
        match self.reader(stored_ref)? {
            Some(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(Some(buf))
            }
            None => Ok(None),
        }
    }

    /// Check whether content exists under the reference.
    fn exists(&self, stored_ref: &StoredRef) -> StoreResult<bool>;

    /// Delete content. Returns `true` if it existed.
    ///
    /// Used to roll back a stored document when a later step of
    /// publishing fails; ordinary operation never deletes.
    fn delete(&self, stored_ref: &StoredRef) -> StoreResult<bool>;

    /// Human-readable locator recorded alongside the document, e.g.
    /// the absolute path for a filesystem store.
    fn locator(&self, stored_ref: &StoredRef) -> String {
        stored_ref.to_string()
    }
}
