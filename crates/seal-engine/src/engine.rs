//! The [`DocSeal`] engine: signing, lookup, and verification wired
//! over pluggable key, content, and ledger backends.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use seal_crypto::{hash_reader, VerifyKey};
use seal_keystore::{FsKeyStore, InMemoryKeyStore, KeyPair, KeyStore};
use seal_ledger::{DocumentDraft, DocumentRecord, FileLedger, InMemoryLedger, Ledger};
use seal_store::{ContentStore, FsContentStore, InMemoryContentStore};
use seal_types::{ContentDigest, SignerId, StoredRef};

use crate::error::{EngineError, EngineResult};
use crate::outcome::{DocumentKey, VerifyReport, VerifyStatus};
use crate::profile::{NoProfiles, ProfileDirectory};

/// Point-in-time counts surfaced by status endpoints.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineStats {
    pub documents: u64,
    pub identities: u64,
}

/// High-level document signing and verification API.
///
/// Signing stores the content, fingerprints the stored copy, signs the
/// digest under the signer's key pair, and appends an immutable record
/// to the ledger. Verification replays that pipeline against the
/// content as it exists now and reports one of four outcomes; see
/// [`VerifyStatus`].
#[derive(Clone)]
pub struct DocSeal {
    keys: Arc<dyn KeyStore>,
    store: Arc<dyn ContentStore>,
    ledger: Arc<dyn Ledger>,
    profiles: Arc<dyn ProfileDirectory>,
}

impl DocSeal {
    /// Fully ephemeral engine for tests and embedding.
    pub fn in_memory() -> Self {
        Self::in_memory_with_key_bits(seal_crypto::DEFAULT_KEY_BITS)
    }

    /// Ephemeral engine generating keys of the given modulus size.
    pub fn in_memory_with_key_bits(key_bits: usize) -> Self {
        Self::with_parts(
            Arc::new(InMemoryKeyStore::with_key_bits(key_bits)),
            Arc::new(InMemoryContentStore::new()),
            Arc::new(InMemoryLedger::new()),
            Arc::new(NoProfiles),
        )
    }

    /// Open (creating if needed) a persistent engine rooted at a
    /// directory. Layout under the root:
    ///
    /// ```text
    /// keys/        per-identity PEM pairs
    /// documents/   stored content, one file per document
    /// ledger.log   append-only record log
    /// ```
    pub fn open(root: impl AsRef<Path>) -> EngineResult<Self> {
        Self::open_with_key_bits(root, seal_crypto::DEFAULT_KEY_BITS)
    }

    /// Like [`open`](Self::open) but generating keys of the given
    /// modulus size. Mainly for tests, where small moduli keep key
    /// generation cheap.
    pub fn open_with_key_bits(root: impl AsRef<Path>, key_bits: usize) -> EngineResult<Self> {
        let root = root.as_ref();
        let keys = FsKeyStore::with_key_bits(root.join("keys"), key_bits)?;
        let store = FsContentStore::open(root.join("documents"))?;
        let ledger = FileLedger::open(root.join("ledger.log"))?;
        Ok(Self::with_parts(
            Arc::new(keys),
            Arc::new(store),
            Arc::new(ledger),
            Arc::new(NoProfiles),
        ))
    }

    /// Assemble an engine from explicit parts.
    pub fn with_parts(
        keys: Arc<dyn KeyStore>,
        store: Arc<dyn ContentStore>,
        ledger: Arc<dyn Ledger>,
        profiles: Arc<dyn ProfileDirectory>,
    ) -> Self {
        Self {
            keys,
            store,
            ledger,
            profiles,
        }
    }

    /// Replace the profile directory.
    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileDirectory>) -> Self {
        self.profiles = profiles;
        self
    }

    // ---- Signing ----

    /// Sign and register a document.
    ///
    /// The content is stored under a freshly minted reference, the
    /// stored copy is fingerprinted, the digest is signed under the
    /// identity's key pair (generated on first use), and the record is
    /// appended to the ledger. If any step after storage fails, the
    /// stored content is rolled back so no orphan blobs survive.
    ///
    /// When `publisher_label` is `None` the profile directory is
    /// consulted for the identity's registered label.
    pub fn sign(
        &self,
        identity: &SignerId,
        display_name: &str,
        content: &[u8],
        publisher_label: Option<String>,
    ) -> EngineResult<DocumentRecord> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(EngineError::InvalidInput(
                "display name must not be empty".to_string(),
            ));
        }

        let pair = self.keys.ensure_key_pair(identity)?;
        let stored_ref = StoredRef::mint(display_name);
        self.store.put(&stored_ref, content)?;

        match self.sign_stored(&pair, &stored_ref, display_name, publisher_label) {
            Ok(record) => {
                info!(
                    id = record.id.value(),
                    identity = %identity,
                    stored_ref = %stored_ref,
                    "document signed"
                );
                Ok(record)
            }
            Err(e) => {
                if let Err(cleanup) = self.store.delete(&stored_ref) {
                    warn!(
                        stored_ref = %stored_ref,
                        error = %cleanup,
                        "rollback of stored content failed"
                    );
                }
                Err(e)
            }
        }
    }

    /// Hash the stored copy, sign, and record. Runs after the content
    /// write; the caller rolls the blob back if this fails.
    fn sign_stored(
        &self,
        pair: &KeyPair,
        stored_ref: &StoredRef,
        display_name: &str,
        publisher_label: Option<String>,
    ) -> EngineResult<DocumentRecord> {
        let reader = self.store.reader(stored_ref)?.ok_or_else(|| {
            EngineError::Internal(format!("stored content vanished: {stored_ref}"))
        })?;
        let content_hash = hash_reader(reader)?;
        let signature = pair.signing_key.sign_digest(&content_hash)?;
        let publisher_label =
            publisher_label.or_else(|| self.profiles.display_name_for(&pair.identity));

        let draft = DocumentDraft {
            stored_ref: stored_ref.clone(),
            display_name: display_name.to_string(),
            content_ref: self.store.locator(stored_ref),
            content_hash,
            signature,
            signer_identity: pair.identity.clone(),
            signer_public_key: pair.public_key_pem()?,
            publisher_label,
        };
        Ok(self.ledger.record(draft)?)
    }

    // ---- Verification ----

    /// Verify a document end to end.
    ///
    /// Looks up the record, re-hashes the stored content, and checks
    /// the recorded signature against the digest recomputed now using
    /// the public key embedded in the record. Missing records, missing
    /// content, and failed signatures all come back as report
    /// statuses, never as errors; only subsystem failures (e.g. an
    /// unreadable ledger) surface as `Err`.
    pub fn verify(&self, key: &DocumentKey) -> EngineResult<VerifyReport> {
        let Some(record) = self.document(key)? else {
            debug!(key = %key, "verification: no record");
            return Ok(VerifyReport::not_found());
        };

        let computed_hash = match self.rehash(&record.stored_ref) {
            Ok(Some(digest)) => digest,
            Ok(None) => {
                debug!(stored_ref = %record.stored_ref, "verification: content gone");
                return Ok(VerifyReport::content_missing(record));
            }
            Err(e) => {
                warn!(
                    stored_ref = %record.stored_ref,
                    error = %e,
                    "content unreadable during verification"
                );
                return Ok(VerifyReport::content_missing(record));
            }
        };

        let hash_matches = computed_hash == record.content_hash;
        // A record whose public key no longer parses can never
        // validate; it is reported as Invalid, not as an error.
        let valid = match VerifyKey::from_public_key_pem(&record.signer_public_key) {
            Ok(vkey) => vkey.verify_digest(&computed_hash, &record.signature),
            Err(_) => false,
        };

        let status = if valid {
            VerifyStatus::Valid
        } else {
            VerifyStatus::Invalid
        };
        debug!(key = %key, %status, hash_matches, "verification complete");

        Ok(VerifyReport {
            status,
            record: Some(record),
            computed_hash: Some(computed_hash),
            hash_matches: Some(hash_matches),
        })
    }

    fn rehash(&self, stored_ref: &StoredRef) -> EngineResult<Option<ContentDigest>> {
        match self.store.reader(stored_ref)? {
            Some(reader) => Ok(Some(hash_reader(reader)?)),
            None => Ok(None),
        }
    }

    // ---- Lookups ----

    /// Fetch a record by key. Returns `Ok(None)` when nothing matches.
    pub fn document(&self, key: &DocumentKey) -> EngineResult<Option<DocumentRecord>> {
        match key {
            DocumentKey::Id(id) => Ok(self.ledger.find_by_id(*id)?),
            DocumentKey::Ref(stored_ref) => Ok(self.ledger.find_by_stored_ref(stored_ref)?),
        }
    }

    /// All records in recording order.
    pub fn documents(&self) -> EngineResult<Vec<DocumentRecord>> {
        Ok(self.ledger.all()?)
    }

    /// Number of recorded documents.
    pub fn document_count(&self) -> EngineResult<u64> {
        Ok(self.ledger.count()?)
    }

    /// Fetch a record together with its stored content.
    pub fn content(&self, key: &DocumentKey) -> EngineResult<(DocumentRecord, Vec<u8>)> {
        let record = self
            .document(key)?
            .ok_or_else(|| EngineError::NotFound(key.to_string()))?;
        let bytes = self
            .store
            .get(&record.stored_ref)?
            .ok_or_else(|| EngineError::ContentMissing(record.stored_ref.clone()))?;
        Ok((record, bytes))
    }

    // ---- Identities ----

    /// Ensure the identity has a key pair and return its public PEM.
    pub fn ensure_identity(&self, identity: &SignerId) -> EngineResult<String> {
        let pair = self.keys.ensure_key_pair(identity)?;
        Ok(pair.public_key_pem()?)
    }

    /// Public key PEM for an identity, if it has a pair. Never
    /// generates.
    pub fn public_key_pem(&self, identity: &SignerId) -> EngineResult<Option<String>> {
        match self.keys.public_key(identity)? {
            Some(key) => Ok(Some(key.to_public_key_pem()?)),
            None => Ok(None),
        }
    }

    /// All identities with a key pair, sorted.
    pub fn identities(&self) -> EngineResult<Vec<SignerId>> {
        Ok(self.keys.identities()?)
    }

    /// Counts for status endpoints.
    pub fn stats(&self) -> EngineResult<EngineStats> {
        Ok(EngineStats {
            documents: self.ledger.count()?,
            identities: self.keys.identities()?.len() as u64,
        })
    }
}

impl std::fmt::Debug for DocSeal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocSeal").finish_non_exhaustive()
    }
}
