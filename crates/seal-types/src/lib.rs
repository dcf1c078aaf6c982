//! Foundation types for DocSeal.
//!
//! This crate provides the core identifier and digest types used throughout
//! the DocSeal system. Every other DocSeal crate depends on `seal-types`.
//!
//! # Key Types
//!
//! - [`SignerId`] — Opaque, validated identity of a signer
//! - [`ContentDigest`] — SHA-256 digest over document bytes (hex interchange)
//! - [`StoredRef`] — Globally unique opaque key for stored document bytes
//! - [`DocumentId`] — Ledger-assigned integer record identifier

pub mod digest;
pub mod document;
pub mod error;
pub mod identity;
pub mod stored_ref;

pub use digest::ContentDigest;
pub use document::DocumentId;
pub use error::TypeError;
pub use identity::SignerId;
pub use stored_ref::StoredRef;
