use seal_types::StoredRef;

/// Errors from content store operations.
///
/// Absent content is not an error; reads return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Content already exists under the reference.
    #[error("content already exists: {0}")]
    AlreadyExists(StoredRef),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
