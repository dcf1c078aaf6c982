//! Per-identity key pair management for DocSeal.
//!
//! A [`KeyStore`] hands out exactly one RSA key pair per signer
//! identity, generating it on first use and returning the same pair
//! forever after. Two backends ship here:
//!
//! - [`FsKeyStore`]: PEM files on disk, one private/public pair per
//!   identity.
//! - [`InMemoryKeyStore`]: ephemeral pairs for tests and embedding.

pub mod error;
pub mod fs;
pub mod keypair;
pub mod memory;
pub mod traits;

pub use error::{KeyStoreError, Result};
pub use fs::FsKeyStore;
pub use keypair::KeyPair;
pub use memory::InMemoryKeyStore;
pub use traits::KeyStore;
