//! Cryptographic primitives for DocSeal.
//!
//! Two concerns live here, deliberately kept free of any storage or
//! ledger knowledge:
//!
//! - [`hasher`]: streaming SHA-256 content fingerprinting.
//! - [`signer`]: RSA-PSS key pairs, signing of digests, and pure
//!   boolean verification.
//!
//! Everything downstream (key stores, the ledger, the engine) builds
//! on these types rather than touching `rsa` or `sha2` directly.

pub mod hasher;
pub mod signer;

pub use hasher::{hash_bytes, hash_reader, ContentHasher, HasherError, HASH_CHUNK_SIZE};
pub use signer::{
    Signature, SignatureError, SigningKey, VerifyKey, DEFAULT_KEY_BITS, MIN_KEY_BITS,
};
