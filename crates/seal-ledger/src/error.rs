//! Error types for ledger operations.

use thiserror::Error;

use seal_types::StoredRef;

/// Errors that can occur while recording or reading ledger entries.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record already exists under this stored reference.
    #[error("stored reference already recorded: {0}")]
    DuplicateStoredRef(StoredRef),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the backing file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
