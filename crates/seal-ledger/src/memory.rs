//! In-memory ledger for testing and ephemeral use.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use seal_types::{DocumentId, StoredRef};

use crate::error::{LedgerError, Result};
use crate::record::{DocumentDraft, DocumentRecord};
use crate::traits::Ledger;

struct LedgerState {
    records: Vec<DocumentRecord>,
    by_id: HashMap<DocumentId, usize>,
    by_ref: HashMap<StoredRef, usize>,
    next_id: u64,
}

/// An in-memory implementation of [`Ledger`].
///
/// Records live in a `Vec` behind a `RwLock`, with id and reference
/// indexes kept alongside. Everything is lost when the ledger drops.
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState {
                records: Vec::new(),
                by_id: HashMap::new(),
                by_ref: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for InMemoryLedger {
    fn record(&self, draft: DocumentDraft) -> Result<DocumentRecord> {
        let mut state = self.state.write().expect("lock poisoned");
        if state.by_ref.contains_key(&draft.stored_ref) {
            return Err(LedgerError::DuplicateStoredRef(draft.stored_ref));
        }

        let record = DocumentRecord {
            id: DocumentId::new(state.next_id),
            stored_ref: draft.stored_ref,
            display_name: draft.display_name,
            content_ref: draft.content_ref,
            content_hash: draft.content_hash,
            signature: draft.signature,
            signer_identity: draft.signer_identity,
            signer_public_key: draft.signer_public_key,
            publisher_label: draft.publisher_label,
            created_at: Utc::now(),
        };

        let idx = state.records.len();
        state.by_id.insert(record.id, idx);
        state.by_ref.insert(record.stored_ref.clone(), idx);
        state.records.push(record.clone());
        state.next_id += 1;
        Ok(record)
    }

    fn find_by_id(&self, id: DocumentId) -> Result<Option<DocumentRecord>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.by_id.get(&id).map(|&idx| state.records[idx].clone()))
    }

    fn find_by_stored_ref(&self, stored_ref: &StoredRef) -> Result<Option<DocumentRecord>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state
            .by_ref
            .get(stored_ref)
            .map(|&idx| state.records[idx].clone()))
    }

    fn all(&self) -> Result<Vec<DocumentRecord>> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.records.clone())
    }

    fn count(&self) -> Result<u64> {
        let state = self.state.read().expect("lock poisoned");
        Ok(state.records.len() as u64)
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.state.read().expect("lock poisoned").records.len();
        f.debug_struct("InMemoryLedger")
            .field("records", &count)
            .finish()
    }
}
