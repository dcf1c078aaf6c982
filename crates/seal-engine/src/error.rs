use thiserror::Error;

use seal_types::StoredRef;

/// Errors from engine operations.
///
/// Verification outcomes (missing record, missing content, bad
/// signature) are not errors; they come back as a
/// [`VerifyReport`](crate::VerifyReport). This enum covers genuine
/// failures: bad input, broken subsystems, and fetches of things that
/// do not exist.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("document not found: {0}")]
    NotFound(String),

    #[error("content missing for stored reference: {0}")]
    ContentMissing(StoredRef),

    #[error(transparent)]
    Crypto(#[from] seal_crypto::SignatureError),

    #[error("hash error: {0}")]
    Hash(#[from] seal_crypto::HasherError),

    #[error("key store error: {0}")]
    KeyStore(#[from] seal_keystore::KeyStoreError),

    #[error("content store error: {0}")]
    Store(#[from] seal_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] seal_ledger::LedgerError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
