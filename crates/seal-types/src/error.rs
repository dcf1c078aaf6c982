/// Errors from parsing or validating foundation types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes had the wrong length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// A signer identity failed validation.
    #[error("invalid signer identity: {0}")]
    InvalidIdentity(String),

    /// A stored reference failed validation.
    #[error("invalid stored reference: {0}")]
    InvalidStoredRef(String),
}
