//! Error types for key store operations.

use thiserror::Error;

use seal_crypto::SignatureError;
use seal_types::SignerId;

/// Errors that can occur while managing signer key pairs.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// No key pair exists for the identity.
    #[error("no key pair for identity: {identity}")]
    NotFound { identity: SignerId },

    /// Stored key material could not be parsed.
    #[error("corrupt key material for identity {identity}: {reason}")]
    Corrupt { identity: SignerId, reason: String },

    /// Key generation or encoding failed.
    #[error(transparent)]
    Crypto(#[from] SignatureError),

    /// I/O error while reading or writing key files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for key store operations.
pub type Result<T> = std::result::Result<T, KeyStoreError>;
