//! Verification outcomes and the keys documents are looked up by.

use std::fmt;

use serde::{Deserialize, Serialize};

use seal_ledger::DocumentRecord;
use seal_types::{ContentDigest, DocumentId, StoredRef};

/// How a caller names the document to verify or fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentKey {
    /// By ledger-assigned id.
    Id(DocumentId),
    /// By stored reference.
    Ref(StoredRef),
}

impl From<DocumentId> for DocumentKey {
    fn from(id: DocumentId) -> Self {
        Self::Id(id)
    }
}

impl From<StoredRef> for DocumentKey {
    fn from(stored_ref: StoredRef) -> Self {
        Self::Ref(stored_ref)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Ref(stored_ref) => write!(f, "stored ref {stored_ref}"),
        }
    }
}

/// Terminal state of one verification run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyStatus {
    /// Signature verifies over the recomputed digest.
    Valid,
    /// The document and its record exist but the signature does not
    /// verify over the content as it is now.
    Invalid,
    /// No ledger record matches the lookup key.
    NotFound,
    /// A record exists but its content cannot be read back.
    ContentMissing,
}

impl VerifyStatus {
    /// Wire rendering, e.g. `"CONTENT_MISSING"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::Invalid => "INVALID",
            Self::NotFound => "NOT_FOUND",
            Self::ContentMissing => "CONTENT_MISSING",
        }
    }

    /// `true` only for [`VerifyStatus::Valid`].
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one verification run learned.
///
/// The signature is always checked against `computed_hash`, the digest
/// of the content as stored right now. `hash_matches` compares that
/// digest with the one recorded at signing time; it is diagnostic and
/// does not decide the status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyReport {
    pub status: VerifyStatus,
    /// The record examined, when the lookup found one.
    pub record: Option<DocumentRecord>,
    /// Digest recomputed from stored content, when it was readable.
    pub computed_hash: Option<ContentDigest>,
    /// Whether the recomputed digest equals the recorded one.
    pub hash_matches: Option<bool>,
}

impl VerifyReport {
    pub(crate) fn not_found() -> Self {
        Self {
            status: VerifyStatus::NotFound,
            record: None,
            computed_hash: None,
            hash_matches: None,
        }
    }

    pub(crate) fn content_missing(record: DocumentRecord) -> Self {
        Self {
            status: VerifyStatus::ContentMissing,
            record: Some(record),
            computed_hash: None,
            hash_matches: None,
        }
    }

    /// `true` only when the run ended [`VerifyStatus::Valid`].
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}
