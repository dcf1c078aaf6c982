//! The ledger's unit of storage: one signed document registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seal_crypto::Signature;
use seal_types::{ContentDigest, DocumentId, SignerId, StoredRef};

/// A completed registration of one signed document.
///
/// Records are immutable once written. Everything needed to verify
/// the document later travels inside the record itself, including the
/// signer's public key at signing time, so verification does not
/// depend on the key store still holding that identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Ledger-assigned identifier, monotonically increasing from 1.
    pub id: DocumentId,
    /// Unique storage reference the content lives under.
    pub stored_ref: StoredRef,
    /// Name the document was submitted as. Not unique.
    pub display_name: String,
    /// Backend locator for the content (a path for filesystem stores).
    /// Diagnostic only; lookups go through `stored_ref`.
    pub content_ref: String,
    /// SHA-256 digest of the content at signing time.
    pub content_hash: ContentDigest,
    /// RSA-PSS signature over `content_hash`.
    pub signature: Signature,
    /// Identity that signed the document.
    pub signer_identity: SignerId,
    /// SPKI PEM of the signer's public key at signing time.
    pub signer_public_key: String,
    /// Optional display label of the publishing party.
    pub publisher_label: Option<String>,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

/// Input for a new ledger record.
///
/// The ledger assigns `id` and `created_at` when the draft is
/// recorded; everything else is provided by the caller.
#[derive(Clone, Debug)]
pub struct DocumentDraft {
    pub stored_ref: StoredRef,
    pub display_name: String,
    pub content_ref: String,
    pub content_hash: ContentDigest,
    pub signature: Signature,
    pub signer_identity: SignerId,
    pub signer_public_key: String,
    pub publisher_label: Option<String>,
}
