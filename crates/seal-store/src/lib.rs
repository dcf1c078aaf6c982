//! Content storage for DocSeal.
//!
//! A [`ContentStore`] keeps the raw bytes of stored documents, keyed
//! by [`StoredRef`](seal_types::StoredRef). It treats content as
//! opaque; fingerprinting and signing live in `seal-crypto`. Two
//! backends ship here: [`FsContentStore`] (one file per document) and
//! [`InMemoryContentStore`] (tests and embedding).

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsContentStore;
pub use memory::InMemoryContentStore;
pub use traits::ContentStore;
