//! The [`Ledger`] trait defining the append-only record log.

use seal_types::{DocumentId, StoredRef};

use crate::error::Result;
use crate::record::{DocumentDraft, DocumentRecord};

/// Append-only store of document records.
///
/// Implementations must be thread-safe (`Send + Sync`) and must never
/// mutate or remove a record once written. Identifiers are assigned in
/// recording order, monotonically increasing from 1, and stored
/// references are unique across the whole ledger.
pub trait Ledger: Send + Sync {
    /// Append a record, assigning its id and timestamp.
    ///
    /// Fails with `DuplicateStoredRef` if the draft's stored reference
    /// already appears in the ledger.
    fn record(&self, draft: DocumentDraft) -> Result<DocumentRecord>;

    /// Look up a record by ledger id.
    ///
    /// Returns `Ok(None)` if no record has that id.
    fn find_by_id(&self, id: DocumentId) -> Result<Option<DocumentRecord>>;

    /// Look up a record by its stored reference.
    ///
    /// Returns `Ok(None)` if no record carries that reference.
    fn find_by_stored_ref(&self, stored_ref: &StoredRef) -> Result<Option<DocumentRecord>>;

    /// All records in recording order.
    fn all(&self) -> Result<Vec<DocumentRecord>>;

    /// Number of records.
    fn count(&self) -> Result<u64> {
        Ok(self.all()?.len() as u64)
    }
}
